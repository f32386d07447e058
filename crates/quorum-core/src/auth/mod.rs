//! Requester context and privilege checks for store operations

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Role, User, UserId};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "quorum_session";

/// The resolved identity a store operation runs on behalf of.
///
/// Built from a fixture user after the credential check; store operations
/// never see raw credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub user_id: UserId,
    pub team_id: String,
    pub role: Role,
}

impl From<&User> for Requester {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            team_id: user.team_id.clone(),
            role: user.role,
        }
    }
}

impl Requester {
    /// Fail with `Forbidden` unless the requester carries elevated privilege.
    ///
    /// Checked before any store mutation touches the collection.
    pub fn require_admin(&self) -> Result<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "This operation requires an admin role".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requester(role: Role) -> Requester {
        Requester {
            user_id: UserId::from("u1"),
            team_id: "t1".to_string(),
            role,
        }
    }

    #[test]
    fn require_admin_accepts_admin() {
        assert!(requester(Role::Admin).require_admin().is_ok());
    }

    #[test]
    fn require_admin_rejects_regular_user() {
        let err = requester(Role::User).require_admin().unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn requester_from_user_copies_scope() {
        let user = User {
            id: UserId::from("u7"),
            email: "bob@example.com".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Lee".to_string(),
            team_id: "t9".to_string(),
            role: Role::User,
            password_hash: "h".to_string(),
            session_token: "s".to_string(),
        };
        let requester = Requester::from(&user);
        assert_eq!(requester.user_id, UserId::from("u7"));
        assert_eq!(requester.team_id, "t9");
    }
}
