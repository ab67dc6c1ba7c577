pub mod auth;
mod user_manager;
mod user_models;
mod user_store;

pub use auth::{AuthToken, AuthTokenValue, BoardHasher, HashedPassword, UsernamePasswordCredentials};
pub use user_manager::{
    AuthenticationOutcome, DetailsOutcome, LoginOutcome, RegistrationOutcome, UserManager,
};
pub use user_models::{compose_handle, User, UserProfile};
pub use user_store::{UserAuthCredentialsStore, UserAuthTokenStore, UserStore};
