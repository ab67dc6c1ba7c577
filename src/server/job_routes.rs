//! Dashboard, postal code search and job posting

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use super::forms::{required, FormError};
use super::session::Session;
use super::state::{GuardedJobRegistry, ServerState};
use super::{flash, internal_error};
use crate::jobs::{Dashboard, Job, NewJob};

pub const JOB_POSTED_MESSAGE: &str = "Job posted.";

#[derive(Deserialize, Debug)]
struct SearchForm {
    pincode: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ProvideForm {
    company_name: Option<String>,
    address: Option<String>,
    pincode: Option<String>,
    salary: Option<String>,
    job_type: Option<String>,
    phone: Option<String>,
}

impl TryFrom<ProvideForm> for NewJob {
    type Error = FormError;

    fn try_from(form: ProvideForm) -> Result<Self, Self::Error> {
        Ok(NewJob {
            company_name: required(form.company_name, "company_name")?,
            address: required(form.address, "address")?,
            pincode: required(form.pincode, "pincode")?,
            salary: required(form.salary, "salary")?,
            job_type: required(form.job_type, "job_type")?,
            phone: required(form.phone, "phone")?,
        })
    }
}

#[derive(Serialize)]
struct HomeView {
    #[serde(flatten)]
    dashboard: Dashboard,
    flash: Vec<String>,
}

#[derive(Serialize)]
struct SearchView {
    pincode: String,
    jobs: Vec<Job>,
}

#[derive(Serialize)]
struct ProvideView {
    flash: Vec<String>,
}

async fn home(
    State(job_registry): State<GuardedJobRegistry>,
    session: Session,
    jar: CookieJar,
) -> Response {
    let dashboard = match job_registry.dashboard(session.user_id) {
        Ok(Some(dashboard)) => dashboard,
        Ok(None) => return Redirect::to("/").into_response(),
        Err(err) => return internal_error(err),
    };
    let (jar, flash) = flash::take(jar);
    (jar, Json(HomeView { dashboard, flash })).into_response()
}

async fn search(
    State(job_registry): State<GuardedJobRegistry>,
    _session: Session,
    Form(form): Form<SearchForm>,
) -> Response {
    let pincode = form.pincode.unwrap_or_default().trim().to_string();
    match job_registry.search_by_postal_code(Some(pincode.as_str())) {
        Ok(jobs) => Json(SearchView { pincode, jobs }).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn provide_view(_session: Session, jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(ProvideView { flash }))
}

async fn provide(
    State(job_registry): State<GuardedJobRegistry>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<ProvideForm>,
) -> Response {
    let job = match NewJob::try_from(form) {
        Ok(job) => job,
        Err(err) => {
            return (flash::push(jar, err.to_string()), Redirect::to("/provide")).into_response()
        }
    };

    match job_registry.post(session.user_id, job) {
        Ok(_) => (flash::push(jar, JOB_POSTED_MESSAGE), Redirect::to("/home")).into_response(),
        Err(err) => internal_error(err),
    }
}

pub fn make_job_routes(state: ServerState) -> Router {
    Router::new()
        .route("/home", get(home))
        .route("/search", post(search))
        .route("/provide", get(provide_view).post(provide))
        .with_state(state)
}
