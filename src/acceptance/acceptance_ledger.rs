use super::{AcceptanceStore, AcceptedJob, AccepterSnapshot};
use crate::jobs::JobStore;
use crate::user::UserStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub enum AcceptOutcome {
    Accepted(AcceptedJob),
    JobNotFound,
    ProfileIncomplete,
}

pub struct AcceptanceLedger {
    user_store: Arc<dyn UserStore>,
    job_store: Arc<dyn JobStore>,
    acceptance_store: Arc<dyn AcceptanceStore>,
}

impl AcceptanceLedger {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        job_store: Arc<dyn JobStore>,
        acceptance_store: Arc<dyn AcceptanceStore>,
    ) -> Self {
        Self {
            user_store,
            job_store,
            acceptance_store,
        }
    }

    /// Accepting the same job twice, or one's own job, is allowed.
    pub fn accept(&self, accepter_id: usize, job_id: usize) -> Result<AcceptOutcome> {
        let accepter = self
            .user_store
            .get_user(accepter_id)?
            .with_context(|| format!("Accepter {} not found", accepter_id))?;
        let profile = match accepter.profile {
            Some(profile) => profile,
            None => return Ok(AcceptOutcome::ProfileIncomplete),
        };
        let job = match self.job_store.get_job(job_id)? {
            Some(job) => job,
            None => return Ok(AcceptOutcome::JobNotFound),
        };

        let accepted = self.acceptance_store.create_accepted_job(
            &job,
            accepter_id,
            &AccepterSnapshot::capture(&profile),
        )?;
        info!(
            "User {} accepted job {} of user {}",
            accepter_id, job.id, job.poster_id
        );
        Ok(AcceptOutcome::Accepted(accepted))
    }

    pub fn inbox_for(&self, poster_id: usize) -> Result<Vec<AcceptedJob>> {
        self.acceptance_store
            .get_accepted_jobs_for_poster(poster_id)
    }
}
