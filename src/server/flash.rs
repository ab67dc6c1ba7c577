//! One-shot messages carried across a redirect in a cookie.
//!
//! The cookie holds a base64url encoded JSON array of strings. Handlers that
//! redirect [`push`] onto it, views [`take`] everything and clear it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::debug;

pub const COOKIE_FLASH_KEY: &str = "flash";

fn read(jar: &CookieJar) -> Vec<String> {
    let Some(cookie) = jar.get(COOKIE_FLASH_KEY) else {
        return vec![];
    };
    let decoded = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Vec<String>>(&bytes).ok());
    match decoded {
        Some(messages) => messages,
        None => {
            debug!("Dropping malformed flash cookie");
            vec![]
        }
    }
}

pub fn push<T: Into<String>>(jar: CookieJar, message: T) -> CookieJar {
    let mut messages = read(&jar);
    messages.push(message.into());
    // Serializing a Vec<String> cannot fail.
    let json = serde_json::to_vec(&messages).unwrap_or_default();
    jar.add(
        Cookie::build((COOKIE_FLASH_KEY, URL_SAFE_NO_PAD.encode(json)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

pub fn take(jar: CookieJar) -> (CookieJar, Vec<String>) {
    let messages = read(&jar);
    if jar.get(COOKIE_FLASH_KEY).is_none() {
        return (jar, messages);
    }
    (jar.remove(Cookie::build(COOKIE_FLASH_KEY).path("/")), messages)
}
