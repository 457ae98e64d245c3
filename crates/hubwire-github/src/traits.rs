//! Trait abstractions for GitHub API operations.
//!
//! This module defines the `GitHubApi` trait which abstracts request execution,
//! enabling dependency injection and testability.

use hubwire_json::JsonSerializer;

use crate::{GitHubRequest, Result};

/// Trait for GitHub API operations.
///
/// Controllers only need the API root and the serializer to build requests;
/// anything that can also execute them can stand in for
/// [`GitHubClient`](crate::GitHubClient), e.g. a mock in tests.
pub trait GitHubApi: Send + Sync {
    /// API root URL without a trailing slash.
    fn api_uri(&self) -> &str;

    /// Serializer used for query arguments, request bodies and responses.
    fn json(&self) -> &JsonSerializer;

    /// Send a request and decode its response.
    fn execute<T: Send>(
        &self,
        request: GitHubRequest<T>,
    ) -> impl std::future::Future<Output = Result<T>> + Send;
}
