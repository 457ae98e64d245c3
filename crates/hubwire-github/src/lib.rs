//! # hubwire-github
//!
//! Typed client for the GitHub REST API.
//!
//! Controllers such as [`NotificationsController`] build [`GitHubRequest`]s;
//! [`GitHubClient::execute`] sends them and decodes the response. All JSON goes
//! through [`hubwire_json::JsonSerializer`], so models use GitHub's
//! `snake_case` field names and lowercase enum values.
//!
//! ```no_run
//! use hubwire_github::{Auth, GitHubClient, NotificationQuery};
//!
//! # async fn run() -> hubwire_github::Result<()> {
//! let client = GitHubClient::new(&Auth::auto())?;
//! let request = client.notifications().get_all(&NotificationQuery::default())?;
//! for notification in client.execute(request).await? {
//!     println!("{}: {}", notification.repository.full_name, notification.subject.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod config;
mod error;
mod notifications;
mod request;
mod traits;
mod types;

pub use auth::Auth;
pub use client::GitHubClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use notifications::{NotificationController, NotificationsController};
pub use request::GitHubRequest;
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use traits::GitHubApi;
pub use types::{
    Notification, NotificationQuery, NotificationReason, NotificationSubject, Owner, OwnerKind,
    Repository, SubjectKind,
};
