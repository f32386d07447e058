//! Quorum CLI - team discussions from the terminal

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;

use cli::{Cli, Commands};
use commands::common::open_client;
use commands::create::run_create;
use commands::delete::run_delete;
use commands::get::run_get;
use commands::list::run_list;
use commands::update::run_update;
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quorum=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let client = open_client(cli.api_url, cli.session)?;

    match cli.command {
        Commands::List { json } => run_list(&client, json).await?,
        Commands::Get { id } => run_get(&client, &id).await?,
        Commands::Create { title, body } => run_create(client, &title, &body).await?,
        Commands::Update { id, title, body } => run_update(&client, &id, title, body).await?,
        Commands::Delete { id } => run_delete(&client, &id).await?,
    }

    Ok(())
}
