//! Request objects built by the controllers and executed by the client.

use std::fmt;

use hubwire_json::{JsonSerializer, Value};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

type Decoder<T> = fn(&JsonSerializer, &str) -> hubwire_json::Result<T>;

/// A described API call whose response decodes into `T`.
///
/// Building a request performs no I/O; hand it to
/// [`GitHubClient::execute`](crate::GitHubClient::execute) to send it.
pub struct GitHubRequest<T> {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) decode: Decoder<T>,
}

impl<T: DeserializeOwned> GitHubRequest<T> {
    /// A request whose response body is decoded as JSON.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            decode: decode_json::<T>,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }
}

impl GitHubRequest<bool> {
    /// A request that only reports whether GitHub answered with a 2xx status.
    ///
    /// The response body, usually empty for 204/205, is not decoded.
    pub fn status(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            decode: accept,
        }
    }
}

impl<T> GitHubRequest<T> {
    /// Add the members of `args` as query parameters.
    ///
    /// Members are named by the JSON strategy. Null members are left out,
    /// strings are sent as-is and other scalars in their JSON form.
    ///
    /// # Errors
    /// Returns error if `args` does not encode as a JSON object.
    pub fn with_args<A: Serialize + ?Sized>(
        mut self,
        json: &JsonSerializer,
        args: &A,
    ) -> Result<Self> {
        let object = json
            .try_serialize_object(Some(args))?
            .ok_or(Error::InvalidArguments)?;

        self.query.extend(
            object
                .into_iter()
                .filter_map(|(name, value)| query_value(value).map(|value| (name, value))),
        );
        Ok(self)
    }

    /// Set the JSON body.
    ///
    /// # Errors
    /// Returns error if `body` fails to encode.
    pub fn with_body<B: Serialize + ?Sized>(
        mut self,
        json: &JsonSerializer,
        body: &B,
    ) -> Result<Self> {
        self.body = Some(json.serialize(body)?);
        Ok(self)
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Decode a successful response body.
    ///
    /// # Errors
    /// Returns error if the body does not decode into `T`.
    pub fn decode(&self, json: &JsonSerializer, body: &str) -> hubwire_json::Result<T> {
        (self.decode)(json, body)
    }
}

impl<T> fmt::Debug for GitHubRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

fn decode_json<T: DeserializeOwned>(json: &JsonSerializer, body: &str) -> hubwire_json::Result<T> {
    json.deserialize(body)
}

#[allow(clippy::unnecessary_wraps)]
const fn accept(_json: &JsonSerializer, _body: &str) -> hubwire_json::Result<bool> {
    Ok(true)
}

fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Serialize)]
    struct Args {
        page: u32,
        per_page: u32,
        all: Option<bool>,
        since: Option<String>,
    }

    #[test]
    fn test_with_args_skips_nulls() {
        let json = JsonSerializer::new();
        let request = GitHubRequest::<Vec<u32>>::get("https://api.github.com/notifications")
            .with_args(
                &json,
                &Args {
                    page: 2,
                    per_page: 50,
                    all: Some(true),
                    since: None,
                },
            )
            .unwrap();

        assert_eq!(
            request.query(),
            &[
                ("page".to_owned(), "2".to_owned()),
                ("per_page".to_owned(), "50".to_owned()),
                ("all".to_owned(), "true".to_owned()),
            ]
        );
    }

    #[test]
    fn test_with_args_rejects_scalars() {
        let json = JsonSerializer::new();
        let result = GitHubRequest::<bool>::get("https://api.github.com").with_args(&json, &5);
        assert!(matches!(result, Err(Error::InvalidArguments)));
    }

    #[test]
    fn test_with_body() {
        let json = JsonSerializer::new();
        let mut body = BTreeMap::new();
        body.insert("last_read_at", "2024-01-01T00:00:00Z");

        let request = GitHubRequest::status(Method::PUT, "https://api.github.com/notifications")
            .with_body(&json, &body)
            .unwrap();

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(
            request.body(),
            Some(r#"{"last_read_at":"2024-01-01T00:00:00Z"}"#)
        );
    }

    #[test]
    fn test_status_request_ignores_body() {
        let json = JsonSerializer::new();
        let request = GitHubRequest::status(Method::PATCH, "https://api.github.com");
        assert!(request.decode(&json, "").unwrap());
    }

    #[test]
    fn test_json_request_decodes_body() {
        let json = JsonSerializer::new();
        let request = GitHubRequest::<Vec<u32>>::get("https://api.github.com");
        assert_eq!(request.decode(&json, "[1,2,3]").unwrap(), vec![1, 2, 3]);
        assert!(request.decode(&json, "").is_err());
    }
}
