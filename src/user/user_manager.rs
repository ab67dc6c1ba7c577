use super::{
    auth::HashedPassword, AuthToken, AuthTokenValue, User, UserAuthCredentialsStore,
    UserAuthTokenStore, UserProfile, UserStore,
};
use anyhow::{bail, Result};
use std::{sync::Arc, time::SystemTime};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum AuthenticationOutcome {
    Authenticated(User),
    WrongPassword,
    UnknownHandle,
}

#[derive(Debug)]
pub enum RegistrationOutcome {
    Registered(User),
    HandleTaken,
}

/// Result of the combined login form, which signs up unknown handles.
#[derive(Debug)]
pub enum LoginOutcome {
    SignedIn(User),
    SignedUp(User),
    WrongPassword,
}

#[derive(Debug)]
pub enum DetailsOutcome {
    Completed,
    AlreadyComplete,
}

pub struct UserManager {
    user_store: Arc<dyn UserStore>,
    credentials_store: Arc<dyn UserAuthCredentialsStore>,
    token_store: Arc<dyn UserAuthTokenStore>,
}

impl UserManager {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        credentials_store: Arc<dyn UserAuthCredentialsStore>,
        token_store: Arc<dyn UserAuthTokenStore>,
    ) -> Self {
        Self {
            user_store,
            credentials_store,
            token_store,
        }
    }

    pub fn authenticate(&self, user_handle: &str, password: &str) -> Result<AuthenticationOutcome> {
        let mut credentials = match self
            .credentials_store
            .get_user_password_credentials(user_handle)?
        {
            Some(credentials) => credentials,
            None => return Ok(AuthenticationOutcome::UnknownHandle),
        };

        let now = SystemTime::now();
        credentials.last_tried = Some(now);
        let matches = credentials.matches(password)?;
        if matches {
            credentials.last_used = Some(now);
        }
        self.credentials_store
            .update_user_password_credentials(&credentials)?;

        if !matches {
            debug!("Wrong password for {}", user_handle);
            return Ok(AuthenticationOutcome::WrongPassword);
        }

        match self.user_store.get_user(credentials.user_id)? {
            Some(user) => Ok(AuthenticationOutcome::Authenticated(user)),
            None => bail!(
                "Credentials of {} point to missing user {}",
                user_handle,
                credentials.user_id
            ),
        }
    }

    pub fn register(&self, user_handle: &str, password: &str) -> Result<RegistrationOutcome> {
        if user_handle.is_empty() {
            bail!("The user handle cannot be empty.")
        }
        let hashed = HashedPassword::new(password)?;
        match self.user_store.create_user(user_handle, &hashed)? {
            Some(user) => {
                info!("Registered user {} with id {}", user.handle, user.id);
                Ok(RegistrationOutcome::Registered(user))
            }
            None => Ok(RegistrationOutcome::HandleTaken),
        }
    }

    /// Authenticates `user_handle`, creating the account if the handle is unknown.
    /// A handle taken by a concurrent signup in between is authenticated once more.
    pub fn login_or_signup(&self, user_handle: &str, password: &str) -> Result<LoginOutcome> {
        match self.authenticate(user_handle, password)? {
            AuthenticationOutcome::Authenticated(user) => return Ok(LoginOutcome::SignedIn(user)),
            AuthenticationOutcome::WrongPassword => return Ok(LoginOutcome::WrongPassword),
            AuthenticationOutcome::UnknownHandle => {}
        }

        match self.register(user_handle, password)? {
            RegistrationOutcome::Registered(user) => Ok(LoginOutcome::SignedUp(user)),
            RegistrationOutcome::HandleTaken => {
                warn!("Handle {} was registered concurrently", user_handle);
                match self.authenticate(user_handle, password)? {
                    AuthenticationOutcome::Authenticated(user) => Ok(LoginOutcome::SignedIn(user)),
                    AuthenticationOutcome::WrongPassword => Ok(LoginOutcome::WrongPassword),
                    AuthenticationOutcome::UnknownHandle => {
                        bail!("Handle {} is taken but has no credentials", user_handle)
                    }
                }
            }
        }
    }

    pub fn complete_details(&self, user_id: usize, profile: UserProfile) -> Result<DetailsOutcome> {
        if self.user_store.set_user_profile_if_empty(user_id, &profile)? {
            info!("User {} completed their details", user_id);
            Ok(DetailsOutcome::Completed)
        } else {
            Ok(DetailsOutcome::AlreadyComplete)
        }
    }

    pub fn get_user(&self, user_id: usize) -> Result<Option<User>> {
        self.user_store.get_user(user_id)
    }

    pub fn count_users(&self) -> Result<usize> {
        self.user_store.count_users()
    }

    pub fn generate_auth_token(&self, user: &User) -> Result<AuthToken> {
        let token = AuthToken {
            user_id: user.id,
            value: AuthTokenValue::generate(),
            created: SystemTime::now(),
            last_used: None,
        };
        self.token_store.add_user_auth_token(token.clone())?;
        Ok(token)
    }

    pub fn get_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        self.token_store.get_user_auth_token(value)
    }

    pub fn touch_auth_token(&self, value: &AuthTokenValue) -> Result<()> {
        self.token_store
            .update_user_auth_token_last_used_timestamp(value)
    }
}
