use super::state::ServerState;
use crate::user::AuthTokenValue;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, error};

/// The authenticated caller, resolved from the session token on every request.
#[derive(Debug)]
pub struct Session {
    pub user_id: usize,
}

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";
pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";

#[derive(Debug)]
pub enum SessionExtractionError {
    Unauthenticated,
    InternalError,
}

impl IntoResponse for SessionExtractionError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SessionExtractionError::Unauthenticated => Redirect::to("/").into_response(),
            SessionExtractionError::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn extract_session_token(parts: &Parts) -> Option<String> {
    let from_cookies = CookieJar::from_headers(&parts.headers)
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(|cookie| cookie.value().to_string());
    from_cookies.or_else(|| {
        parts
            .headers
            .get(HEADER_SESSION_TOKEN_KEY)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
    })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = SessionExtractionError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let token = match extract_session_token(parts) {
            Some(token) => token,
            None => {
                debug!("No token in cookies nor headers.");
                return Err(SessionExtractionError::Unauthenticated);
            }
        };

        let auth_token_value = AuthTokenValue(token);
        let auth_token = match ctx.user_manager.get_auth_token(&auth_token_value) {
            Ok(Some(auth_token)) => auth_token,
            Ok(None) => {
                debug!("Auth token not found in database");
                return Err(SessionExtractionError::Unauthenticated);
            }
            Err(err) => {
                error!("Failed to get auth token from database: {:#}", err);
                return Err(SessionExtractionError::InternalError);
            }
        };

        if let Err(err) = ctx.user_manager.touch_auth_token(&auth_token_value) {
            debug!("Failed to update auth token last_used timestamp: {}", err);
        }

        Ok(Session {
            user_id: auth_token.user_id,
        })
    }
}
