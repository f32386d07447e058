use quorum_core::client::ApiClient;
use quorum_core::models::DiscussionId;

use crate::commands::common::{author_label, format_timestamp};
use crate::error::CliError;

pub async fn run_get(client: &ApiClient, id: &str) -> Result<(), CliError> {
    let discussion = client.get_discussion(&DiscussionId::from(id)).await?;

    println!("{}", discussion.title);
    println!(
        "by {} on {}",
        author_label(&discussion.author),
        format_timestamp(discussion.created_at)
    );
    println!();
    println!("{}", discussion.body);
    Ok(())
}
