//! Stores - client-side state containers
//!
//! Each store is an isolated struct with interior mutability, constructed
//! directly where needed (no global singletons). Derived values are
//! computed on read, never cached.

pub mod current_news;
pub mod news_filter;
pub mod session;

pub use current_news::CurrentNewsStore;
pub use news_filter::{FilterKind, NewsCounts, NewsFilterStore};
pub use session::{Session, SessionStore};
