mod acceptance_ledger;
mod acceptance_models;
mod acceptance_store;

pub use acceptance_ledger::{AcceptOutcome, AcceptanceLedger};
pub use acceptance_models::{AcceptedJob, AccepterSnapshot};
pub use acceptance_store::AcceptanceStore;
