//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Reqwest HTTP client for NewsGateway
//! - Local filesystem for SessionVault
//! - In-process demo server for demo mode and tests

pub mod demo;
pub mod file_vault;
pub mod http;

pub use demo::{DemoConfig, DemoServer};
pub use file_vault::FileVault;
pub use http::HttpGateway;
