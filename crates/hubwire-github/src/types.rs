//! GitHub API types.

use chrono::{DateTime, Utc};
use hubwire_json::Locator;
use serde::{Deserialize, Serialize};

/// A notification thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Thread ID.
    pub id: String,

    /// Repository the thread belongs to.
    pub repository: Repository,

    /// The issue, PR, release etc. the thread is about.
    pub subject: NotificationSubject,

    /// Why the user is subscribed.
    pub reason: NotificationReason,

    /// Whether the thread has unread activity.
    pub unread: bool,

    /// Last activity on the thread.
    pub updated_at: DateTime<Utc>,

    /// When the user last read the thread, if ever.
    pub last_read_at: Option<DateTime<Utc>>,

    /// API URL of the thread.
    pub url: Locator,

    /// API URL of the thread subscription.
    #[serde(default)]
    pub subscription_url: Option<Locator>,
}

/// The subject of a notification thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSubject {
    pub title: String,

    /// API URL of the subject; absent for some kinds, e.g. discussions.
    pub url: Option<Locator>,

    pub latest_comment_url: Option<Locator>,

    #[serde(rename = "type")]
    pub kind: SubjectKind,
}

/// Kind of notification subject.
///
/// GitHub sends these in `PascalCase` (`"PullRequest"`); they are matched
/// case-insensitively and written back lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectKind {
    Issue,
    PullRequest,
    Commit,
    Release,
    Discussion,
    CheckSuite,
    RepositoryInvitation,
    RepositoryVulnerabilityAlert,
    RepositoryDependabotAlertsThread,
}

/// Why a notification was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    ApprovalRequested,
    Assign,
    Author,
    CiActivity,
    Comment,
    Invitation,
    Manual,
    MemberFeatureRequested,
    Mention,
    ReviewRequested,
    SecurityAdvisoryCredit,
    SecurityAlert,
    StateChange,
    Subscribed,
    TeamMention,
}

/// Minimal repository as embedded in a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub private: bool,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub html_url: Locator,
    pub url: Locator,
}

/// Repository owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: Option<Locator>,
    pub html_url: Locator,
    #[serde(rename = "type")]
    pub kind: OwnerKind,
}

/// Kind of account owning a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerKind {
    User,
    Organization,
    Bot,
}

/// Query for listing notifications.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationQuery {
    /// Page number, starting at 1.
    pub page: u32,

    /// Results per page (max 100).
    pub per_page: u32,

    /// Include notifications already marked as read.
    pub all: Option<bool>,

    /// Only notifications the user participates in or is mentioned in.
    pub participating: Option<bool>,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 100,
            all: None,
            participating: None,
        }
    }
}

/// Body of the mark-as-read requests.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct MarkRead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_read_at: Option<String>,
}

impl MarkRead {
    /// Timestamps are sent as UTC with second precision, e.g. `2024-01-01T10:00:00Z`.
    pub fn at(last_read_at: Option<DateTime<Utc>>) -> Self {
        Self {
            last_read_at: last_read_at.map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use hubwire_json::JsonSerializer;

    use super::*;

    fn notification_json() -> serde_json::Value {
        serde_json::json!({
            "id": "1",
            "repository": {
                "id": 1_296_269,
                "name": "Hello-World",
                "full_name": "octocat/Hello-World",
                "owner": {
                    "login": "octocat",
                    "id": 1,
                    "avatar_url": "https://github.com/images/error/octocat_happy.gif",
                    "html_url": "https://github.com/octocat",
                    "type": "User"
                },
                "private": false,
                "description": "This your first repo!",
                "fork": false,
                "html_url": "https://github.com/octocat/Hello-World",
                "url": "https://api.github.com/repos/octocat/Hello-World"
            },
            "subject": {
                "title": "Greetings",
                "url": "https://api.github.com/repos/octokit/octokit.rb/issues/123",
                "latest_comment_url": "https://api.github.com/repos/octokit/octokit.rb/issues/comments/123",
                "type": "PullRequest"
            },
            "reason": "review_requested",
            "unread": true,
            "updated_at": "2014-11-07T22:01:45Z",
            "last_read_at": null,
            "url": "https://api.github.com/notifications/threads/1",
            "subscription_url": "https://api.github.com/notifications/threads/1/subscription"
        })
    }

    #[test]
    fn test_notification_deserialization() {
        let json = JsonSerializer::new();
        let notification: Notification = json.from_value(notification_json()).unwrap();

        assert_eq!(notification.id, "1");
        assert_eq!(notification.reason, NotificationReason::ReviewRequested);
        assert_eq!(notification.subject.kind, SubjectKind::PullRequest);
        assert_eq!(notification.repository.owner.kind, OwnerKind::User);
        assert_eq!(notification.repository.full_name, "octocat/Hello-World");
        assert!(notification.unread);
        assert!(notification.last_read_at.is_none());
        assert_eq!(
            notification.updated_at,
            Utc.with_ymd_and_hms(2014, 11, 7, 22, 1, 45).unwrap()
        );
        assert_eq!(
            notification.url.as_str(),
            "https://api.github.com/notifications/threads/1"
        );
    }

    #[test]
    fn test_notification_tolerates_odd_urls() {
        let json = JsonSerializer::new();
        let mut value = notification_json();
        value["subject"]["url"] = serde_json::Value::Null;
        value["subject"]["latest_comment_url"] = serde_json::json!("not a url");

        let notification: Notification = json.from_value(value).unwrap();
        assert!(notification.subject.url.is_none());
        assert_eq!(
            notification.subject.latest_comment_url,
            Some(Locator::Raw("not a url".into()))
        );
    }

    #[test]
    fn test_notification_roundtrip() {
        let json = JsonSerializer::new();
        let notification: Notification = json.from_value(notification_json()).unwrap();

        let value = json.to_value(&notification).unwrap();
        assert_eq!(value["subject"]["type"], "pullrequest");
        assert_eq!(value["reason"], "review_requested");
        assert_eq!(value["last_read_at"], serde_json::Value::Null);

        let back: Notification = json.from_value(value).unwrap();
        assert_eq!(back.subject.kind, SubjectKind::PullRequest);
        assert_eq!(back.reason, NotificationReason::ReviewRequested);
    }

    #[test]
    fn test_unknown_reason_is_an_error() {
        let json = JsonSerializer::new();
        let mut value = notification_json();
        value["reason"] = serde_json::json!("gossip");

        let err = json.from_value::<Notification>(value).unwrap_err();
        assert!(matches!(
            err,
            hubwire_json::Error::UnknownVariant { ref value, .. } if value == "gossip"
        ));
    }

    #[test]
    fn test_notification_query_default() {
        let query = NotificationQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 100);
        assert!(query.all.is_none());
        assert!(query.participating.is_none());
    }

    #[test]
    fn test_mark_read_body() {
        let json = JsonSerializer::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 5).unwrap();

        assert_eq!(
            json.serialize(&MarkRead::at(Some(at))).unwrap(),
            r#"{"last_read_at":"2024-03-01T09:30:05Z"}"#
        );
        assert_eq!(json.serialize(&MarkRead::at(None)).unwrap(), "{}");
    }
}
