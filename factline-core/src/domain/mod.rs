//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod news;
mod user;
pub mod result;

pub use news::{Comment, CommentAuthor, CommentDraft, News, NewsDraft, Vote, VoteTally};
pub use user::{AuthSession, Registration, Role, User};
