//! Accepting jobs and the poster's inbox

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::session::Session;
use super::state::{GuardedAcceptanceLedger, ServerState};
use super::{flash, internal_error};
use crate::acceptance::{AcceptOutcome, AcceptedJob};

pub const JOB_ACCEPTED_MESSAGE: &str =
    "Job accepted! Your details have been sent to the job poster's inbox.";
pub const JOB_NOT_FOUND_MESSAGE: &str = "Job not found.";
pub const PROFILE_INCOMPLETE_MESSAGE: &str = "Please complete your details before accepting a job.";

#[derive(Serialize)]
struct InboxView {
    accepted_jobs: Vec<AcceptedJob>,
}

async fn accept(
    State(acceptance_ledger): State<GuardedAcceptanceLedger>,
    session: Session,
    Path(job_id): Path<usize>,
    jar: CookieJar,
) -> Response {
    let (message, target) = match acceptance_ledger.accept(session.user_id, job_id) {
        Ok(AcceptOutcome::Accepted(_)) => (JOB_ACCEPTED_MESSAGE, "/home"),
        Ok(AcceptOutcome::JobNotFound) => (JOB_NOT_FOUND_MESSAGE, "/home"),
        Ok(AcceptOutcome::ProfileIncomplete) => (PROFILE_INCOMPLETE_MESSAGE, "/details"),
        Err(err) => return internal_error(err),
    };
    (flash::push(jar, message), Redirect::to(target)).into_response()
}

async fn inbox(
    State(acceptance_ledger): State<GuardedAcceptanceLedger>,
    session: Session,
) -> Response {
    match acceptance_ledger.inbox_for(session.user_id) {
        Ok(accepted_jobs) => Json(InboxView { accepted_jobs }).into_response(),
        Err(err) => internal_error(err),
    }
}

pub fn make_acceptance_routes(state: ServerState) -> Router {
    Router::new()
        .route("/accept/{job_id}", get(accept))
        .route("/inbox", get(inbox))
        .with_state(state)
}
