use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quorum")]
#[command(about = "Team discussions from the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the Quorum API (falls back to QUORUM_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Session token (falls back to QUORUM_SESSION)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your team's discussions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single discussion
    Get {
        /// Discussion ID
        id: String,
    },
    /// Start a new discussion (admin only)
    #[command(alias = "new")]
    Create {
        /// Discussion title
        title: String,
        /// Discussion body
        #[arg(short, long)]
        body: String,
    },
    /// Update a discussion (admin only)
    Update {
        /// Discussion ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a discussion (admin only)
    Delete {
        /// Discussion ID
        id: String,
    },
}
