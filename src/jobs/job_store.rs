use super::{Job, NewJob};
use anyhow::Result;

pub trait JobStore: Send + Sync {
    /// Persists a new job owned by `poster_id` and returns it with its id.
    /// Returns Err if the poster does not exist.
    fn create_job(&self, poster_id: usize, job: &NewJob) -> Result<Job>;

    /// Returns Ok(None) if the job does not exist.
    fn get_job(&self, job_id: usize) -> Result<Option<Job>>;

    /// Returns all jobs in id order.
    fn get_all_jobs(&self) -> Result<Vec<Job>>;

    fn count_jobs(&self) -> Result<usize>;

    /// Returns the jobs whose pincode is exactly `pincode`, in id order.
    fn get_jobs_by_pincode(&self, pincode: &str) -> Result<Vec<Job>>;
}
