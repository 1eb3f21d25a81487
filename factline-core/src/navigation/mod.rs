//! Navigation - route table, guards, and cancellation

pub mod cancel;
pub mod navigator;
pub mod route;

pub use cancel::{CancelSource, CancelToken};
pub use navigator::{NavOutcome, Navigator, NoProgress, ProgressSink};
pub use route::{ListingFilter, Route};
