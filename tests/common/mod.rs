//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer};
//!
//! #[tokio::test]
//! async fn test_dashboard() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::alice(server.base_url.clone()).await;
//!
//!     let dashboard = client.dashboard().await;
//!     assert_eq!(dashboard["total_users"], 1);
//! }
//! ```

mod client;
mod constants;
mod server;

pub use client::{location, TestClient};
pub use constants::*;
pub use server::TestServer;
