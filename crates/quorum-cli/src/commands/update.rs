use quorum_core::client::ApiClient;
use quorum_core::models::{DiscussionId, UpdateDiscussion};

use crate::error::CliError;

pub async fn run_update(
    client: &ApiClient,
    id: &str,
    title: Option<String>,
    body: Option<String>,
) -> Result<(), CliError> {
    if title.is_none() && body.is_none() {
        return Err(CliError::EmptyUpdate);
    }

    let updated = client
        .update_discussion(&DiscussionId::from(id), &UpdateDiscussion { title, body })
        .await?;

    println!("{}  {}", updated.id, updated.title);
    Ok(())
}
