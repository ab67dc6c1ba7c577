use axum::extract::FromRef;

use crate::acceptance::AcceptanceLedger;
use crate::jobs::JobRegistry;
use crate::store::BoardStore;
use crate::user::UserManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedUserManager = Arc<UserManager>;
pub type GuardedJobRegistry = Arc<JobRegistry>;
pub type GuardedAcceptanceLedger = Arc<AcceptanceLedger>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub user_manager: GuardedUserManager,
    pub job_registry: GuardedJobRegistry,
    pub acceptance_ledger: GuardedAcceptanceLedger,
    pub hash: String,
}

impl ServerState {
    pub fn new<S: BoardStore + 'static>(config: ServerConfig, store: Arc<S>) -> Self {
        let user_manager = UserManager::new(store.clone(), store.clone(), store.clone());
        let job_registry = JobRegistry::new(store.clone(), store.clone());
        let acceptance_ledger = AcceptanceLedger::new(store.clone(), store.clone(), store);
        ServerState {
            config,
            start_time: Instant::now(),
            user_manager: Arc::new(user_manager),
            job_registry: Arc::new(job_registry),
            acceptance_ledger: Arc::new(acceptance_ledger),
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedUserManager {
    fn from_ref(input: &ServerState) -> Self {
        input.user_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedJobRegistry {
    fn from_ref(input: &ServerState) -> Self {
        input.job_registry.clone()
    }
}

impl FromRef<ServerState> for GuardedAcceptanceLedger {
    fn from_ref(input: &ServerState) -> Self {
        input.acceptance_ledger.clone()
    }
}
