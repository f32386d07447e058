//! Shared helpers for CLI commands

use std::env;

use quorum_core::client::ApiClient;
use quorum_core::models::{AuthorProjection, DiscussionWithAuthor};

use crate::error::CliError;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8787";

pub fn open_client(
    api_url: Option<String>,
    session: Option<String>,
) -> Result<ApiClient, CliError> {
    let api_url = resolve_api_url(api_url, |name| env::var(name).ok());
    let session = resolve_session(session, |name| env::var(name).ok())?;
    Ok(ApiClient::new(api_url, session)?)
}

pub(crate) fn resolve_api_url(
    flag: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    flag.or_else(|| lookup("QUORUM_API_URL"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

pub(crate) fn resolve_session(
    flag: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, CliError> {
    flag.or_else(|| lookup("QUORUM_SESSION"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            CliError::Config(
                "Set --session or QUORUM_SESSION to your session token".to_string(),
            )
        })
}

pub fn author_label(author: &AuthorProjection) -> String {
    match author {
        AuthorProjection::Resolved(summary) => {
            format!("{} {}", summary.first_name, summary.last_name)
        }
        AuthorProjection::Missing {} => "unknown".to_string(),
    }
}

pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string())
}

pub fn format_discussion_lines(discussions: &[DiscussionWithAuthor]) -> Vec<String> {
    discussions
        .iter()
        .map(|discussion| {
            format!(
                "{}  {}  ({}, {})",
                discussion.id,
                discussion.title,
                author_label(&discussion.author),
                format_timestamp(discussion.created_at)
            )
        })
        .collect()
}
