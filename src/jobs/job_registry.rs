use super::{Job, JobStore, NewJob};
use crate::user::{User, UserStore};
use anyhow::{bail, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything the home page shows.
#[derive(Serialize, Debug)]
pub struct Dashboard {
    pub user: User,
    pub total_users: usize,
    pub total_jobs: usize,
    pub jobs: Vec<Job>,
}

pub struct JobRegistry {
    user_store: Arc<dyn UserStore>,
    job_store: Arc<dyn JobStore>,
}

impl JobRegistry {
    pub fn new(user_store: Arc<dyn UserStore>, job_store: Arc<dyn JobStore>) -> Self {
        Self {
            user_store,
            job_store,
        }
    }

    /// Returns Ok(None) if the user does not exist.
    pub fn dashboard(&self, user_id: usize) -> Result<Option<Dashboard>> {
        let user = match self.user_store.get_user(user_id)? {
            Some(user) => user,
            None => return Ok(None),
        };
        let jobs = self.list_all()?;
        Ok(Some(Dashboard {
            user,
            total_users: self.user_store.count_users()?,
            total_jobs: self.job_store.count_jobs()?,
            jobs,
        }))
    }

    pub fn list_all(&self) -> Result<Vec<Job>> {
        self.job_store.get_all_jobs()
    }

    pub fn post(&self, poster_id: usize, mut job: NewJob) -> Result<Job> {
        if self.user_store.get_user(poster_id)?.is_none() {
            bail!("Cannot post a job for missing user {}", poster_id);
        }
        job.pincode = job.pincode.trim().to_string();
        let job = self.job_store.create_job(poster_id, &job)?;
        info!("User {} posted job {} at {}", poster_id, job.id, job.pincode);
        Ok(job)
    }

    /// Exact match on the trimmed code. A blank or absent code matches nothing.
    pub fn search_by_postal_code(&self, pincode: Option<&str>) -> Result<Vec<Job>> {
        let pincode = match pincode.map(str::trim) {
            Some(pincode) if !pincode.is_empty() => pincode,
            _ => return Ok(vec![]),
        };
        let jobs = self.job_store.get_jobs_by_pincode(pincode)?;
        debug!("Found {} jobs at {}", jobs.len(), pincode);
        Ok(jobs)
    }
}
