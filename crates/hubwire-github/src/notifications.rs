//! Notifications endpoints.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::request::GitHubRequest;
use crate::traits::GitHubApi;
use crate::types::{MarkRead, Notification, NotificationQuery};

/// `/notifications`: the authenticated user's notification threads.
#[derive(Debug)]
pub struct NotificationsController<'a, A = GitHubClient> {
    api: &'a A,
}

impl<'a, A: GitHubApi> NotificationsController<'a, A> {
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}/notifications", self.api.api_uri())
    }

    /// A single notification thread.
    pub fn thread(&self, id: impl Into<String>) -> NotificationController<'a, A> {
        NotificationController {
            api: self.api,
            id: id.into(),
        }
    }

    /// List notifications.
    ///
    /// # Errors
    /// Returns error if the query fails to encode.
    pub fn get_all(
        &self,
        query: &NotificationQuery,
    ) -> Result<GitHubRequest<Vec<Notification>>> {
        GitHubRequest::get(self.uri()).with_args(self.api.json(), query)
    }

    /// Mark all notifications as read, optionally only those updated before
    /// `last_read_at`.
    ///
    /// # Errors
    /// Returns error if the body fails to encode.
    pub fn mark_as_read(
        &self,
        last_read_at: Option<DateTime<Utc>>,
    ) -> Result<GitHubRequest<bool>> {
        GitHubRequest::status(Method::PUT, self.uri())
            .with_body(self.api.json(), &MarkRead::at(last_read_at))
    }

    /// Mark all notifications in one repository as read.
    ///
    /// # Errors
    /// Returns error if the body fails to encode.
    pub fn mark_repo_as_read(
        &self,
        owner: &str,
        repo: &str,
        last_read_at: Option<DateTime<Utc>>,
    ) -> Result<GitHubRequest<bool>> {
        let url = format!(
            "{}/repos/{owner}/{repo}/notifications",
            self.api.api_uri()
        );
        GitHubRequest::status(Method::PUT, url)
            .with_body(self.api.json(), &MarkRead::at(last_read_at))
    }
}

/// `/notifications/threads/{id}`.
#[derive(Debug)]
pub struct NotificationController<'a, A = GitHubClient> {
    api: &'a A,
    id: String,
}

impl<A: GitHubApi> NotificationController<'_, A> {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}/notifications/threads/{}", self.api.api_uri(), self.id)
    }

    /// Fetch the thread.
    #[must_use]
    pub fn get(&self) -> GitHubRequest<Notification> {
        GitHubRequest::get(self.uri())
    }

    /// Mark the thread as read.
    #[must_use]
    pub fn mark_as_read(&self) -> GitHubRequest<bool> {
        GitHubRequest::status(Method::PATCH, self.uri())
    }
}
