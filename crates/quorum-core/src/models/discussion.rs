//! Discussion model and its wire/cache projections

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{UserId, UserSummary};

/// An opaque, server-assigned discussion identifier.
///
/// Fresh identifiers are UUID v7 (time-sortable), but any opaque string
/// read back from fixtures or the wire is accepted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscussionId(String);

impl DiscussionId {
    /// Create a new unique discussion ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DiscussionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DiscussionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DiscussionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DiscussionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A discussion as confirmed by the server.
///
/// Invariant: belongs to exactly one team scope and exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: DiscussionId,
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    pub team_id: String,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Discussion {
    /// Create a new discussion with a fresh ID and server timestamp
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author_id: UserId,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            id: DiscussionId::new(),
            title: title.into(),
            body: body.into(),
            author_id,
            team_id: team_id.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Request body for creating a discussion.
///
/// Callers are responsible for supplying non-empty title and body; the
/// transport sends the input as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscussion {
    pub title: String,
    pub body: String,
}

impl NewDiscussion {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Request body for patching a discussion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDiscussion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// The resolved author attached to list/get responses.
///
/// A discussion whose author no longer exists resolves to an empty object
/// rather than an omitted field or an error; consumers rely on this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorProjection {
    Resolved(UserSummary),
    Missing {},
}

impl AuthorProjection {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing {})
    }
}

impl From<Option<UserSummary>> for AuthorProjection {
    fn from(author: Option<UserSummary>) -> Self {
        author.map_or(Self::Missing {}, Self::Resolved)
    }
}

/// A discussion augmented with its resolved author, as returned by the
/// list and get endpoints.
///
/// The list projection drops the raw `authorId` in favor of the resolved
/// `author` object; the single-record projection keeps both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionWithAuthor {
    pub id: DiscussionId,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    pub team_id: String,
    pub created_at: i64,
    pub author: AuthorProjection,
}

impl DiscussionWithAuthor {
    /// List projection: `authorId` is dropped
    #[must_use]
    pub fn for_list(discussion: Discussion, author: Option<UserSummary>) -> Self {
        Self {
            id: discussion.id,
            title: discussion.title,
            body: discussion.body,
            author_id: None,
            team_id: discussion.team_id,
            created_at: discussion.created_at,
            author: author.into(),
        }
    }

    /// Single-record projection: `authorId` is kept alongside `author`
    #[must_use]
    pub fn for_get(discussion: Discussion, author: Option<UserSummary>) -> Self {
        Self {
            id: discussion.id,
            title: discussion.title,
            body: discussion.body,
            author_id: Some(discussion.author_id),
            team_id: discussion.team_id,
            created_at: discussion.created_at,
            author: author.into(),
        }
    }
}

/// An element of the cached discussions collection.
///
/// An optimistic entry carries only the user-supplied fields; the
/// server-assigned fields stay absent until the entry is confirmed, and
/// absent fields are skipped entirely when the collection is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedDiscussion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DiscussionId>,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl From<&NewDiscussion> for CachedDiscussion {
    /// The optimistic form: no server-assigned fields yet
    fn from(input: &NewDiscussion) -> Self {
        Self {
            id: None,
            title: input.title.clone(),
            body: input.body.clone(),
            author_id: None,
            team_id: None,
            created_at: None,
        }
    }
}

impl From<Discussion> for CachedDiscussion {
    fn from(discussion: Discussion) -> Self {
        Self {
            id: Some(discussion.id),
            title: discussion.title,
            body: discussion.body,
            author_id: Some(discussion.author_id),
            team_id: Some(discussion.team_id),
            created_at: Some(discussion.created_at),
        }
    }
}

impl From<DiscussionWithAuthor> for CachedDiscussion {
    fn from(discussion: DiscussionWithAuthor) -> Self {
        Self {
            id: Some(discussion.id),
            title: discussion.title,
            body: discussion.body,
            author_id: discussion.author_id,
            team_id: Some(discussion.team_id),
            created_at: Some(discussion.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::user::{Role, UserId};
    use super::*;

    fn author_summary() -> UserSummary {
        UserSummary {
            id: UserId::from("u1"),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Chen".to_string(),
            team_id: "t1".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn discussion_id_unique() {
        assert_ne!(DiscussionId::new(), DiscussionId::new());
    }

    #[test]
    fn discussion_new_assigns_id_and_timestamp() {
        let discussion = Discussion::new("Title", "Body", UserId::from("u1"), "t1");
        assert!(!discussion.id.as_str().is_empty());
        assert!(discussion.created_at > 0);
    }

    #[test]
    fn discussion_serializes_camel_case() {
        let discussion = Discussion {
            id: DiscussionId::from("abc"),
            title: "T".to_string(),
            body: "B".to_string(),
            author_id: UserId::from("u1"),
            team_id: "t1".to_string(),
            created_at: 1_700_000_000_000,
        };
        assert_eq!(
            serde_json::to_string(&discussion).unwrap(),
            r#"{"id":"abc","title":"T","body":"B","authorId":"u1","teamId":"t1","createdAt":1700000000000}"#
        );
    }

    #[test]
    fn optimistic_entry_serializes_user_fields_only() {
        let entry = CachedDiscussion::from(&NewDiscussion::new("T", "B"));
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"title":"T","body":"B"}"#
        );
    }

    #[test]
    fn confirmed_entry_keeps_server_fields() {
        let discussion = Discussion::new("T", "B", UserId::from("u1"), "t1");
        let entry = CachedDiscussion::from(discussion.clone());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], discussion.id.as_str());
        assert_eq!(json["createdAt"], discussion.created_at);
    }

    #[test]
    fn missing_author_serializes_as_empty_object() {
        let discussion = Discussion::new("T", "B", UserId::from("gone"), "t1");
        let projected = DiscussionWithAuthor::for_list(discussion, None);
        let json = serde_json::to_value(&projected).unwrap();
        assert_eq!(json["author"], serde_json::json!({}));
        assert!(json.get("authorId").is_none());
    }

    #[test]
    fn resolved_author_round_trips() {
        let discussion = Discussion::new("T", "B", UserId::from("u1"), "t1");
        let projected = DiscussionWithAuthor::for_get(discussion, Some(author_summary()));

        let json = serde_json::to_string(&projected).unwrap();
        let parsed: DiscussionWithAuthor = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, projected);
        assert!(!parsed.author.is_missing());
        assert_eq!(parsed.author_id, Some(UserId::from("u1")));
    }

    #[test]
    fn empty_author_object_deserializes_as_missing() {
        let json = r#"{"id":"d1","title":"T","body":"B","teamId":"t1","createdAt":1,"author":{}}"#;
        let parsed: DiscussionWithAuthor = serde_json::from_str(json).unwrap();
        assert!(parsed.author.is_missing());
    }

    #[test]
    fn update_skips_absent_fields() {
        let update = UpdateDiscussion {
            title: Some("New".to_string()),
            body: None,
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"title":"New"}"#
        );
    }
}
