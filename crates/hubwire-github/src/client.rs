//! GitHub API client.

use hubwire_json::JsonSerializer;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT,
};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::notifications::NotificationsController;
use crate::request::GitHubRequest;
use crate::traits::GitHubApi;

/// GitHub API client.
#[derive(Debug)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: Option<SecretString>,
    json: JsonSerializer,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let config = ClientConfig {
            api_url: base_url.into(),
            ..ClientConfig::default()
        };
        Self::from_config(&config, auth)
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    /// Returns error if authentication fails or the configured user agent is
    /// not a valid header value.
    pub fn from_config(config: &ClientConfig, auth: &Auth) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_root().to_owned(),
            token,
            json: JsonSerializer::new(),
        })
    }

    /// Replace the JSON serializer, e.g. to share a member cache.
    #[must_use]
    pub fn with_json(mut self, json: JsonSerializer) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn api_uri(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn json(&self) -> &JsonSerializer {
        &self.json
    }

    /// Notification endpoints.
    #[must_use]
    pub const fn notifications(&self) -> NotificationsController<'_> {
        NotificationsController::new(self)
    }

    /// Send a request and decode its response.
    ///
    /// # Errors
    /// Returns error on network failure, a non-success status, or a body that
    /// does not decode into `T`.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute<T>(&self, request: GitHubRequest<T>) -> Result<T> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.as_str());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "GitHub responded");

        if !status.is_success() {
            return Err(error_for_status(response, &request.url).await);
        }

        let body = response.text().await?;
        Ok(request.decode(&self.json, &body)?)
    }
}

/// Map an unsuccessful response to an error.
async fn error_for_status(response: Response, url: &str) -> Error {
    let status = response.status().as_u16();

    let error = match status {
        401 => Error::AuthenticationFailed,
        403 if response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|v| v == "0") =>
        {
            Error::RateLimited
        }
        404 => Error::NotFound(url.to_owned()),
        _ => {
            let text = response.text().await.unwrap_or_default();
            Error::ApiError {
                status,
                message: text,
            }
        }
    };

    warn!(status, %error, "GitHub request failed");
    error
}

// === Trait Implementation ===

impl GitHubApi for GitHubClient {
    fn api_uri(&self) -> &str {
        self.api_uri()
    }

    fn json(&self) -> &JsonSerializer {
        self.json()
    }

    async fn execute<T: Send>(&self, request: GitHubRequest<T>) -> Result<T> {
        self.execute(request).await
    }
}
