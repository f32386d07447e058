//! quorum-core - Core library for Quorum
//!
//! This crate contains the shared models, the fixture-backed discussion
//! store used by the mock API, and the client-side pieces (HTTP client,
//! query cache, optimistic create mutation) used by all Quorum interfaces.

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod mutation;
pub mod notify;
pub mod store;

pub use error::{Error, Result};
pub use models::{Discussion, DiscussionId, User, UserId};
