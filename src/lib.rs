//! Job board server library
//!
//! Users sign up with a `base@number` handle, post jobs, search them by postal
//! code, and accept them. Accepting forwards the accepter's details to the
//! poster's inbox.

pub mod acceptance;
pub mod config;
pub mod jobs;
pub mod server;
pub mod sqlite_persistence;
pub mod store;
pub mod user;

pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use store::{BoardStore, SqliteBoardStore};
