mod acceptance_routes;
mod account_routes;
pub mod config;
mod flash;
mod forms;
mod http_layers;
mod job_routes;
pub mod server;
pub(self) mod session;
pub mod state;

pub use acceptance_routes::{
    JOB_ACCEPTED_MESSAGE, JOB_NOT_FOUND_MESSAGE, PROFILE_INCOMPLETE_MESSAGE,
};
pub use account_routes::{INVALID_CREDENTIALS_MESSAGE, WELCOME_MESSAGE};
pub use config::ServerConfig;
pub use flash::COOKIE_FLASH_KEY;
pub use http_layers::*;
pub use job_routes::JOB_POSTED_MESSAGE;
pub use server::{make_app, run_server};
pub use session::{COOKIE_SESSION_TOKEN_KEY, HEADER_SESSION_TOKEN_KEY};

pub(self) use server::internal_error;
