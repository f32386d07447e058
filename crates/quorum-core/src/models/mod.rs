//! Domain models shared between the mock server and the client

mod discussion;
mod user;

pub use discussion::{
    AuthorProjection, CachedDiscussion, Discussion, DiscussionId, DiscussionWithAuthor,
    NewDiscussion, UpdateDiscussion,
};
pub use user::{sanitize_user, Role, User, UserId, UserSummary};
