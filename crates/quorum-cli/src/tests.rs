use clap::Parser;
use pretty_assertions::assert_eq;

use quorum_core::models::{
    AuthorProjection, Discussion, DiscussionWithAuthor, Role, UserId, UserSummary,
};

use crate::cli::{Cli, Commands};
use crate::commands::common::{
    author_label, format_discussion_lines, format_timestamp, resolve_api_url, resolve_session,
};

fn no_env(_name: &str) -> Option<String> {
    None
}

#[test]
fn cli_parses_create_with_body_flag() {
    let cli = Cli::parse_from(["quorum", "create", "Release plan", "--body", "Ship it?"]);
    match cli.command {
        Commands::Create { title, body } => {
            assert_eq!(title, "Release plan");
            assert_eq!(body, "Ship it?");
        }
        _ => panic!("expected create command"),
    }
}

#[test]
fn cli_accepts_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["quorum", "list", "--session", "tok", "--json"]);
    assert_eq!(cli.session.as_deref(), Some("tok"));
    assert!(matches!(cli.command, Commands::List { json: true }));
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["quorum"]).is_err());
}

#[test]
fn resolve_api_url_prefers_flag_over_env() {
    let url = resolve_api_url(Some("http://flag:1".to_string()), |_| {
        Some("http://env:2".to_string())
    });
    assert_eq!(url, "http://flag:1");
}

#[test]
fn resolve_api_url_defaults_to_local_server() {
    assert_eq!(resolve_api_url(None, no_env), "http://127.0.0.1:8787");
}

#[test]
fn resolve_session_requires_a_value() {
    assert!(resolve_session(None, no_env).is_err());
    assert!(resolve_session(Some("  ".to_string()), no_env).is_err());
    assert_eq!(
        resolve_session(Some(" tok ".to_string()), no_env).unwrap(),
        "tok"
    );
}

#[test]
fn format_timestamp_renders_utc_minutes() {
    assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13");
}

#[test]
fn discussion_lines_include_author_and_date() {
    let discussion = Discussion {
        id: "d1".into(),
        title: "Release plan".to_string(),
        body: "Ship it?".to_string(),
        author_id: UserId::from("u1"),
        team_id: "t1".to_string(),
        created_at: 1_700_000_000_000,
    };
    let author = UserSummary {
        id: UserId::from("u1"),
        email: "alice@example.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Chen".to_string(),
        team_id: "t1".to_string(),
        role: Role::Admin,
    };

    let lines = format_discussion_lines(&[DiscussionWithAuthor::for_list(
        discussion,
        Some(author),
    )]);
    assert_eq!(lines, vec!["d1  Release plan  (Alice Chen, 2023-11-14 22:13)"]);
}

#[test]
fn missing_author_renders_as_unknown() {
    assert_eq!(author_label(&AuthorProjection::Missing {}), "unknown");
}
