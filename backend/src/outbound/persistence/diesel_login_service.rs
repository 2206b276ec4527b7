//! Diesel-backed `LoginService` that checks Argon2id password hashes.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

use super::diesel_user_repository::DieselUserRepository;
use super::password::{PasswordHashError, verify_password};

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

/// Decide a login attempt from the stored account, if any.
///
/// Unknown accounts and wrong passwords produce the same error.
fn check_credentials(
    stored: Option<(UserId, String)>,
    password: &str,
) -> Result<UserId, Error> {
    let Some((user_id, hash)) = stored else {
        return Err(invalid_credentials());
    };
    match verify_password(password, &hash) {
        Ok(true) => Ok(user_id),
        Ok(false) => Err(invalid_credentials()),
        Err(err @ PasswordHashError::MalformedHash { .. }) => {
            warn!(%user_id, error = %err, "stored password hash is unusable");
            Err(invalid_credentials())
        }
        Err(err) => Err(Error::internal(err.to_string())),
    }
}

/// `LoginService` backed by the `users` table.
#[derive(Clone)]
pub struct DieselLoginService {
    users: DieselUserRepository,
}

impl DieselLoginService {
    /// Create a new service reading credentials through `users`.
    pub fn new(users: DieselUserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self.users.find_credentials(credentials.username()).await?;
        let password = credentials.password().to_owned();
        let outcome = tokio::task::spawn_blocking(move || {
            let password = zeroize::Zeroizing::new(password);
            check_credentials(stored, &password)
        })
        .await
        .map_err(|err| Error::internal(format!("password check aborted: {err}")))?;
        if outcome.is_err() {
            debug!(username = credentials.username(), "login rejected");
        }
        outcome
    }
}
