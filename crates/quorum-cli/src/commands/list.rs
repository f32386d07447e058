use quorum_core::client::ApiClient;

use crate::commands::common::format_discussion_lines;
use crate::error::CliError;

pub async fn run_list(client: &ApiClient, as_json: bool) -> Result<(), CliError> {
    let discussions = client.list_discussions().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&discussions)?);
    } else if discussions.is_empty() {
        println!("No discussions yet");
    } else {
        for line in format_discussion_lines(&discussions) {
            println!("{line}");
        }
    }

    Ok(())
}
