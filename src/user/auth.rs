//! Password hashing and session tokens

use anyhow::{bail, Result};

use rand::Rng;
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

const AUTH_TOKEN_LENGTH: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct AuthTokenValue(pub String);

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct AuthToken {
    pub user_id: usize,
    pub created: SystemTime,
    pub last_used: Option<SystemTime>,
    pub value: AuthTokenValue,
}

impl AuthTokenValue {
    pub fn generate() -> AuthTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(AUTH_TOKEN_LENGTH)
            .map(char::from)
            .collect();
        AuthTokenValue(random_string)
    }
}

mod board_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn generate_b64_salt() -> String {
        SaltString::generate(&mut OsRng).to_string()
    }

    pub fn hash<T: AsRef<str>>(plain: &[u8], b64_salt: T) -> Result<String> {
        let salt = SaltString::from_b64(b64_salt.as_ref()).map_err(|err| anyhow!("{}", err))?;
        let hash_string = Argon2::default()
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain_pw: &[u8], target_hash: T) -> Result<bool> {
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(Argon2::default()
            .verify_password(plain_pw, &password_hash)
            .is_ok())
    }
}

/// The algorithm a stored password hash was produced with. Persisted next to
/// the hash so older credentials keep verifying if the default ever changes.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum BoardHasher {
    Argon2,
}

impl FromStr for BoardHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(BoardHasher::Argon2),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl fmt::Display for BoardHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardHasher::Argon2 => write!(f, "argon2"),
        }
    }
}

impl BoardHasher {
    pub fn generate_b64_salt(&self) -> String {
        match self {
            BoardHasher::Argon2 => board_argon2::generate_b64_salt(),
        }
    }

    pub fn hash<T: AsRef<str>>(&self, plain: &[u8], b64_salt: T) -> Result<String> {
        match self {
            BoardHasher::Argon2 => board_argon2::hash(plain, b64_salt),
        }
    }

    /// The salt is embedded in argon2 PHC strings, `_salt` is for hashers that
    /// keep it apart.
    pub fn verify<T: AsRef<str>>(&self, plain_pw: T, target_hash: T, _salt: T) -> Result<bool> {
        match self {
            BoardHasher::Argon2 => board_argon2::verify(plain_pw.as_ref().as_bytes(), target_hash),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct UsernamePasswordCredentials {
    pub user_id: usize,
    pub salt: String,
    pub hash: String,
    pub hasher: BoardHasher,

    pub created: SystemTime,
    pub last_tried: Option<SystemTime>,
    pub last_used: Option<SystemTime>,
}

impl UsernamePasswordCredentials {
    pub fn matches<T: AsRef<str>>(&self, password: T) -> Result<bool> {
        self.hasher
            .verify(password.as_ref(), self.hash.as_str(), self.salt.as_str())
    }
}

/// A freshly salted and hashed password, not yet bound to a user.
#[derive(Clone, Debug)]
pub struct HashedPassword {
    pub salt: String,
    pub hash: String,
    pub hasher: BoardHasher,
}

impl HashedPassword {
    pub fn new<T: AsRef<str>>(password: T) -> Result<Self> {
        let hasher = BoardHasher::Argon2;
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password.as_ref().as_bytes(), &salt)?;
        Ok(HashedPassword { salt, hash, hasher })
    }
}
