//! Login, implicit signup and the one-time details step

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::forms::{required, FormError};
use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
use super::state::{GuardedUserManager, ServerState};
use super::{flash, internal_error};
use crate::user::{compose_handle, DetailsOutcome, LoginOutcome, User, UserProfile};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
pub const WELCOME_MESSAGE: &str = "Welcome! Please complete your details.";

#[derive(Deserialize, Debug)]
struct LoginForm {
    username: Option<String>,
    number: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize, Debug)]
struct DetailsForm {
    name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    pincode: Option<String>,
}

impl LoginForm {
    fn into_handle_and_password(self) -> Result<(String, String), FormError> {
        let base = required(self.username, "username")?;
        let number = required(self.number, "number")?;
        let password = required(self.password, "password")?;
        Ok((compose_handle(&base, &number), password))
    }
}

impl TryFrom<DetailsForm> for UserProfile {
    type Error = FormError;

    fn try_from(form: DetailsForm) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            name: required(form.name, "name")?,
            address: required(form.address, "address")?,
            city: required(form.city, "city")?,
            pincode: required(form.pincode, "pincode")?,
        })
    }
}

#[derive(Serialize)]
struct LoginView {
    flash: Vec<String>,
}

#[derive(Serialize)]
struct DetailsView {
    handle: String,
    flash: Vec<String>,
}

fn with_session_cookie(jar: CookieJar, token: String) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION_TOKEN_KEY, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

fn landing_page(user: &User) -> &'static str {
    if user.is_profile_complete() {
        "/home"
    } else {
        "/details"
    }
}

async fn login_view(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = flash::take(jar);
    (jar, Json(LoginView { flash }))
}

async fn login(
    State(user_manager): State<GuardedUserManager>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let (handle, password) = match form.into_handle_and_password() {
        Ok(x) => x,
        Err(err) => return (flash::push(jar, err.to_string()), Redirect::to("/")).into_response(),
    };

    let (user, jar) = match user_manager.login_or_signup(&handle, &password) {
        Ok(LoginOutcome::SignedIn(user)) => (user, jar),
        Ok(LoginOutcome::SignedUp(user)) => (user, flash::push(jar, WELCOME_MESSAGE)),
        Ok(LoginOutcome::WrongPassword) => {
            debug!("Rejected login for {}", handle);
            return (
                flash::push(jar, INVALID_CREDENTIALS_MESSAGE),
                Redirect::to("/"),
            )
                .into_response();
        }
        Err(err) => return internal_error(err),
    };

    match user_manager.generate_auth_token(&user) {
        Ok(token) => {
            info!("User {} logged in", user.handle);
            let jar = with_session_cookie(jar, token.value.0);
            (jar, Redirect::to(landing_page(&user))).into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn details_view(
    State(user_manager): State<GuardedUserManager>,
    session: Session,
    jar: CookieJar,
) -> Response {
    let user = match user_manager.get_user(session.user_id) {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/").into_response(),
        Err(err) => return internal_error(err),
    };
    if user.is_profile_complete() {
        return Redirect::to("/home").into_response();
    }
    let (jar, flash) = flash::take(jar);
    (
        jar,
        Json(DetailsView {
            handle: user.handle,
            flash,
        }),
    )
        .into_response()
}

async fn submit_details(
    State(user_manager): State<GuardedUserManager>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<DetailsForm>,
) -> Response {
    let profile = match UserProfile::try_from(form) {
        Ok(profile) => profile,
        Err(err) => {
            return (flash::push(jar, err.to_string()), Redirect::to("/details")).into_response()
        }
    };

    match user_manager.complete_details(session.user_id, profile) {
        Ok(DetailsOutcome::Completed) => Redirect::to("/home").into_response(),
        Ok(DetailsOutcome::AlreadyComplete) => {
            debug!("User {} already completed their details", session.user_id);
            Redirect::to("/home").into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub fn make_account_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", get(login_view).post(login))
        .route("/details", get(details_view).post(submit_details))
        .with_state(state)
}
