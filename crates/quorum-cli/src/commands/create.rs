//! Create a discussion through the optimistic mutation path.
//!
//! A one-shot CLI has no long-lived collection view, so the cache starts
//! empty and is discarded at exit; the command still runs the full
//! begin/settle lifecycle so the success notification comes from the
//! mutation layer, not from this command.

use std::sync::Arc;

use quorum_core::cache::MemoryDiscussionCache;
use quorum_core::client::ApiClient;
use quorum_core::models::NewDiscussion;
use quorum_core::mutation::CreateDiscussionMutation;
use quorum_core::notify::{Notification, NotificationSink};

use crate::error::CliError;

struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", notification.title);
    }
}

pub async fn run_create(client: ApiClient, title: &str, body: &str) -> Result<(), CliError> {
    let title = title.trim();
    let body = body.trim();
    if title.is_empty() {
        return Err(CliError::EmptyField("title"));
    }
    if body.is_empty() {
        return Err(CliError::EmptyField("body"));
    }

    let mutation = CreateDiscussionMutation::new(
        Arc::new(client),
        Arc::new(MemoryDiscussionCache::new()),
        Arc::new(TerminalNotifier),
    );
    let discussion = mutation.execute(NewDiscussion::new(title, body)).await?;

    println!("{}", discussion.id);
    Ok(())
}
