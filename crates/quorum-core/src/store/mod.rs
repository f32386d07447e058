//! Fixture-backed discussion store used by the mock API.
//!
//! Holds the user and discussion fixtures in memory, applies team scoping
//! and privilege checks, and writes the collection through to a JSON
//! fixture file on every mutation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::auth::Requester;
use crate::error::{Error, Result};
use crate::models::{
    sanitize_user, Discussion, DiscussionId, DiscussionWithAuthor, NewDiscussion, UpdateDiscussion,
    User, UserId, UserSummary,
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct FixtureData {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    discussions: Vec<Discussion>,
}

/// In-memory fixture store with optional write-through persistence
pub struct FixtureStore {
    inner: RwLock<FixtureData>,
    fixture_path: Option<PathBuf>,
}

impl FixtureStore {
    /// Store without persistence; mutations stay in memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(FixtureData::default()),
            fixture_path: None,
        }
    }

    /// Store persisted at `path`, loading existing fixture data if present
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read(&path).await?;
            serde_json::from_slice(&raw)?
        } else {
            FixtureData::default()
        };
        Ok(Self {
            inner: RwLock::new(data),
            fixture_path: Some(path),
        })
    }

    /// Replace the user fixtures (bootstrap/test helper; not persisted)
    pub async fn seed_users(&self, users: Vec<User>) {
        self.inner.write().await.users = users;
    }

    /// Replace the discussion fixtures (bootstrap/test helper; not persisted)
    pub async fn seed_discussions(&self, discussions: Vec<Discussion>) {
        self.inner.write().await.discussions = discussions;
    }

    /// Whether any user fixtures are loaded
    pub async fn has_users(&self) -> bool {
        !self.inner.read().await.users.is_empty()
    }

    pub async fn user_by_id(&self, id: &UserId) -> Option<User> {
        let data = self.inner.read().await;
        data.users.iter().find(|user| &user.id == id).cloned()
    }

    /// Resolve the fixture user presenting `token` as their credential
    pub async fn user_by_session_token(&self, token: &str) -> Option<User> {
        if token.is_empty() {
            return None;
        }
        let data = self.inner.read().await;
        data.users
            .iter()
            .find(|user| user.session_token == token)
            .cloned()
    }

    /// List the requester's team's discussions, each with its author
    /// resolved to a sanitized projection (or an empty object if the
    /// author no longer exists).
    pub async fn list_discussions(&self, requester: &Requester) -> Vec<DiscussionWithAuthor> {
        let data = self.inner.read().await;
        data.discussions
            .iter()
            .filter(|discussion| discussion.team_id == requester.team_id)
            .map(|discussion| {
                let author = find_author(&data, discussion);
                DiscussionWithAuthor::for_list(discussion.clone(), author)
            })
            .collect()
    }

    /// Fetch one discussion by id, scoped to the requester's team
    pub async fn get_discussion(
        &self,
        id: &DiscussionId,
        requester: &Requester,
    ) -> Result<DiscussionWithAuthor> {
        let data = self.inner.read().await;
        let discussion = data
            .discussions
            .iter()
            .find(|discussion| &discussion.id == id && discussion.team_id == requester.team_id)
            .ok_or_else(|| Error::NotFound("Discussion not found".to_string()))?;
        let author = find_author(&data, discussion);
        Ok(DiscussionWithAuthor::for_get(discussion.clone(), author))
    }

    /// Create a discussion on behalf of `requester`.
    ///
    /// Requires elevated privilege, checked before the collection is
    /// touched; a rejected request never reaches the fixture file.
    pub async fn create_discussion(
        &self,
        input: NewDiscussion,
        requester: &Requester,
    ) -> Result<Discussion> {
        requester.require_admin()?;
        validate_title_body(Some(&input.title), Some(&input.body))?;

        let mut data = self.inner.write().await;
        let discussion = Discussion::new(
            input.title,
            input.body,
            requester.user_id.clone(),
            requester.team_id.clone(),
        );
        data.discussions.push(discussion.clone());
        self.persist(&data).await?;
        Ok(discussion)
    }

    /// Patch a discussion, scoped to the requester's team
    pub async fn update_discussion(
        &self,
        id: &DiscussionId,
        input: UpdateDiscussion,
        requester: &Requester,
    ) -> Result<Discussion> {
        requester.require_admin()?;
        validate_title_body(input.title.as_deref(), input.body.as_deref())?;

        let mut data = self.inner.write().await;
        let discussion = data
            .discussions
            .iter_mut()
            .find(|discussion| &discussion.id == id && discussion.team_id == requester.team_id)
            .ok_or_else(|| Error::NotFound("Discussion not found".to_string()))?;
        if let Some(title) = input.title {
            discussion.title = title;
        }
        if let Some(body) = input.body {
            discussion.body = body;
        }
        let updated = discussion.clone();
        self.persist(&data).await?;
        Ok(updated)
    }

    /// Delete a discussion, scoped to the requester's team, returning the
    /// removed record
    pub async fn delete_discussion(
        &self,
        id: &DiscussionId,
        requester: &Requester,
    ) -> Result<Discussion> {
        requester.require_admin()?;

        let mut data = self.inner.write().await;
        let index = data
            .discussions
            .iter()
            .position(|discussion| &discussion.id == id && discussion.team_id == requester.team_id)
            .ok_or_else(|| Error::NotFound("Discussion not found".to_string()))?;
        let removed = data.discussions.remove(index);
        self.persist(&data).await?;
        Ok(removed)
    }

    /// Write the full fixture collection through to disk.
    ///
    /// Runs before any mutation returns success; a store without a fixture
    /// path skips the write.
    async fn persist(&self, data: &FixtureData) -> Result<()> {
        let Some(path) = self.fixture_path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_vec_pretty(data)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }

    /// Path the store persists to, if any
    #[must_use]
    pub fn fixture_path(&self) -> Option<&Path> {
        self.fixture_path.as_deref()
    }
}

fn find_author(data: &FixtureData, discussion: &Discussion) -> Option<UserSummary> {
    data.users
        .iter()
        .find(|user| user.id == discussion.author_id)
        .map(sanitize_user)
}

fn validate_title_body(title: Option<&str>, body: Option<&str>) -> Result<()> {
    if title.is_some_and(|title| title.trim().is_empty()) {
        return Err(Error::InvalidInput("title must not be empty".to_string()));
    }
    if body.is_some_and(|body| body.trim().is_empty()) {
        return Err(Error::InvalidInput("body must not be empty".to_string()));
    }
    Ok(())
}
