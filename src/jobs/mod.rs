mod job_models;
mod job_registry;
mod job_store;

pub use job_models::{Job, NewJob};
pub use job_registry::{Dashboard, JobRegistry};
pub use job_store::JobStore;
