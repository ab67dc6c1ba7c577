use super::{AcceptedJob, AccepterSnapshot};
use crate::jobs::Job;
use anyhow::Result;

pub trait AcceptanceStore: Send + Sync {
    /// Records that `accepter_id` accepted `job`, storing the snapshot by value.
    fn create_accepted_job(
        &self,
        job: &Job,
        accepter_id: usize,
        accepter: &AccepterSnapshot,
    ) -> Result<AcceptedJob>;

    /// Returns the accepted jobs addressed to `poster_id`, in id order.
    fn get_accepted_jobs_for_poster(&self, poster_id: usize) -> Result<Vec<AcceptedJob>>;
}
