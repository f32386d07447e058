//! Demo fixture users seeded when the store starts empty.
//!
//! The tokens are deliberately predictable so a fresh mock server is
//! usable immediately; there are no real credentials anywhere in the
//! fixture layer.

use quorum_core::models::{Role, User, UserId};

pub fn demo_users() -> Vec<User> {
    vec![
        demo_user(
            "andrea.admin",
            "Andrea",
            "Admin",
            "team-alpha",
            Role::Admin,
            "demo-admin-token",
        ),
        demo_user(
            "morgan.member",
            "Morgan",
            "Member",
            "team-alpha",
            Role::User,
            "demo-member-token",
        ),
        demo_user(
            "blair.beta",
            "Blair",
            "Beta",
            "team-beta",
            Role::Admin,
            "demo-beta-token",
        ),
    ]
}

fn demo_user(
    handle: &str,
    first_name: &str,
    last_name: &str,
    team_id: &str,
    role: Role,
    session_token: &str,
) -> User {
    User {
        id: UserId::from(handle),
        email: format!("{handle}@quorum.test"),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        team_id: team_id.to_string(),
        role,
        password_hash: "demo-fixture-not-a-real-hash".to_string(),
        session_token: session_token.to_string(),
    }
}
