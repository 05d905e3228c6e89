use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use log::info;
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};
use thiserror::Error;

use crate::{
    db::{read, write},
    models::User,
};

/// Rejection raised during registration or login. `status` follows the same
/// HTTP-like categories as the trading errors, with 403 for bad credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("must provide username")]
    MissingUsername,
    #[error("must provide password")]
    MissingPassword,
    #[error("must confirm password")]
    MissingConfirmation,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("username taken")]
    UsernameTaken,
    #[error("invalid username and/or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 403,
            AuthError::Storage(_) => 500,
            _ => 400,
        }
    }
}

/// Registration and credential checks for ledger users. New accounts start
/// with the configured cash balance; cash is only ever moved by trades.
pub struct AccountService {
    connection: Pool<Sqlite>,
    starting_cash: Decimal,
}

impl AccountService {
    pub fn new(connection: Pool<Sqlite>, starting_cash: Decimal) -> Self {
        Self {
            connection,
            starting_cash,
        }
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if confirmation.is_empty() {
            return Err(AuthError::MissingConfirmation);
        }
        if password != confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        if read::get_user_by_username(username, &self.connection)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| anyhow!("Failed to hash password: {}", err))?
            .to_string();

        let mut tx = self
            .connection
            .begin()
            .await
            .context("Failed to begin transaction")?;
        let id = write::insert_user(username, &password_hash, &self.starting_cash, &mut tx).await?;
        tx.commit().await.context("Failed to commit registration")?;

        info!("Registered user {} ({})", username, id);
        Ok(User::new(
            id,
            username.to_string(),
            password_hash,
            self.starting_cash,
        ))
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let user = read::get_user_by_username(username, &self.connection)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(user.password_hash())
            .map_err(|err| anyhow!("Stored password hash is malformed: {}", err))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(user)
    }
}
