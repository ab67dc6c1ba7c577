use super::auth::{AuthToken, AuthTokenValue, HashedPassword, UsernamePasswordCredentials};
use super::user_models::{User, UserProfile};
use anyhow::Result;

pub trait UserAuthCredentialsStore: Send + Sync {
    /// Returns the user's password credentials given the user handle.
    /// Returns Ok(None) if the user does not exist.
    /// Returns Err if there is a database error.
    fn get_user_password_credentials(
        &self,
        user_handle: &str,
    ) -> Result<Option<UsernamePasswordCredentials>>;

    /// Persists the last_tried and last_used timestamps of the credentials.
    fn update_user_password_credentials(
        &self,
        credentials: &UsernamePasswordCredentials,
    ) -> Result<()>;
}

pub trait UserAuthTokenStore: Send + Sync {
    /// Returns a user's authentication token given an AuthTokenValue.
    /// Returns Ok(None) if the token does not exist.
    /// Returns Err if there is a database error.
    fn get_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;

    /// Updates an auth token with the latest timestamp.
    fn update_user_auth_token_last_used_timestamp(&self, token: &AuthTokenValue) -> Result<()>;

    /// Adds a new auth token.
    fn add_user_auth_token(&self, token: AuthToken) -> Result<()>;
}

pub trait UserStore: Send + Sync {
    /// Creates a new user together with its password credentials.
    /// Returns Ok(None) if the handle is already taken.
    fn create_user(&self, user_handle: &str, password: &HashedPassword) -> Result<Option<User>>;

    /// Returns Ok(None) if the user does not exist.
    fn get_user(&self, user_id: usize) -> Result<Option<User>>;

    /// Returns Ok(None) if no user has the given handle.
    fn get_user_by_handle(&self, user_handle: &str) -> Result<Option<User>>;

    fn count_users(&self) -> Result<usize>;

    /// Stores the profile only if the user has none yet.
    /// Returns Ok(false) if the profile was already set or the user does not exist.
    fn set_user_profile_if_empty(&self, user_id: usize, profile: &UserProfile) -> Result<bool>;
}
