use quorum_core::client::ApiClient;
use quorum_core::models::DiscussionId;

use crate::error::CliError;

pub async fn run_delete(client: &ApiClient, id: &str) -> Result<(), CliError> {
    let removed = client.delete_discussion(&DiscussionId::from(id)).await?;
    println!("Deleted {}  {}", removed.id, removed.title);
    Ok(())
}
