//! Registration and login.
//!
//! Validation problems and bad credentials come back as
//! [`AuthError::Rejected`] carrying the message shown on the form; everything
//! else is an internal [`AppError`].

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{users::is_unique_violation, UserRepo},
    error::AppError,
    models::User,
    services::password::{hash_password, verify_password},
};

pub const MISSING_USERNAME: &str = "Missing username.";
pub const MISSING_PASSWORD: &str = "Missing password.";
pub const MISSING_CONFIRMATION: &str = "Please confirm your password.";
pub const PASSWORD_MISMATCH: &str = "Passwords don't match.";
pub const USERNAME_TAKEN: &str = "Sorry, this username is already taken.";
pub const BAD_CREDENTIALS: &str = "Incorrect username and/or password.";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Shown to the user as-is
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::App(err.into())
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AuthError::App(err.into())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub confirmation: Option<String>,
}

/// Empty form fields count as missing
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Both fields, or the "missing" messages joined by a space
fn require_credentials<'a>(
    username: &'a Option<String>,
    password: &'a Option<String>,
) -> Result<(&'a str, &'a str), AuthError> {
    match (present(username), present(password)) {
        (Some(username), Some(password)) => Ok((username, password)),
        (username, password) => {
            let mut errors = Vec::new();
            if username.is_none() {
                errors.push(MISSING_USERNAME);
            }
            if password.is_none() {
                errors.push(MISSING_PASSWORD);
            }
            Err(AuthError::Rejected(errors.join(" ")))
        }
    }
}

/// Checks a registration form without touching the store
pub fn validate_registration(form: &RegisterForm) -> Result<(&str, &str), AuthError> {
    let (username, password) = require_credentials(&form.username, &form.password)?;

    let Some(confirmation) = present(&form.confirmation) else {
        return Err(AuthError::Rejected(MISSING_CONFIRMATION.to_string()));
    };

    if password != confirmation {
        return Err(AuthError::Rejected(PASSWORD_MISMATCH.to_string()));
    }

    Ok((username, password))
}

/// Creates a user from a registration form
///
/// The existence pre-check only gives a friendly message early; the UNIQUE
/// constraint decides when two registrations race.
pub async fn register(pool: &SqlitePool, form: &RegisterForm) -> Result<User, AuthError> {
    let (username, password) = validate_registration(form)?;

    if UserRepo::username_exists(pool, username).await? {
        return Err(AuthError::Rejected(USERNAME_TAKEN.to_string()));
    }

    let hash = hash_password(password)?;
    let user = match UserRepo::create(pool, username, &hash).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            return Err(AuthError::Rejected(USERNAME_TAKEN.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Checks credentials, giving the same message for unknown users and wrong passwords
pub async fn login(pool: &SqlitePool, form: &LoginForm) -> Result<User, AuthError> {
    let (username, password) = require_credentials(&form.username, &form.password)?;

    let Some(user) = UserRepo::find_by_username(pool, username).await? else {
        tracing::info!(username = %username, "Login rejected: unknown user");
        return Err(AuthError::Rejected(BAD_CREDENTIALS.to_string()));
    };

    if !verify_password(password, &user.hash)? {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AuthError::Rejected(BAD_CREDENTIALS.to_string()));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::test_pool;

    fn registration(username: &str, password: &str, confirmation: &str) -> RegisterForm {
        let field = |v: &str| (!v.is_empty()).then(|| v.to_string());
        RegisterForm {
            username: field(username),
            password: field(password),
            confirmation: field(confirmation),
        }
    }

    fn credentials(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn rejection(result: Result<impl std::fmt::Debug, AuthError>) -> String {
        match result {
            Err(AuthError::Rejected(msg)) => msg,
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_registration_messages_in_order() {
        assert_eq!(
            rejection(validate_registration(&registration("", "", ""))),
            "Missing username. Missing password."
        );
        assert_eq!(
            rejection(validate_registration(&registration("ann", "", "x"))),
            MISSING_PASSWORD
        );
        assert_eq!(
            rejection(validate_registration(&registration("ann", "pw", ""))),
            MISSING_CONFIRMATION
        );
        assert_eq!(
            rejection(validate_registration(&registration("ann", "pw", "pW"))),
            PASSWORD_MISMATCH
        );
        assert!(validate_registration(&registration("ann", "pw", "pw")).is_ok());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = test_pool().await;
        let user = register(&pool, &registration("ann", "secret", "secret"))
            .await
            .unwrap();

        let logged_in = login(&pool, &credentials("ann", "secret")).await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_ne!(logged_in.hash, "secret");
    }

    #[tokio::test]
    async fn test_register_taken_username() {
        let pool = test_pool().await;
        register(&pool, &registration("ann", "a", "a")).await.unwrap();

        assert_eq!(
            rejection(register(&pool, &registration("ann", "b", "b")).await),
            USERNAME_TAKEN
        );
    }

    #[tokio::test]
    async fn test_concurrent_registrations_leave_one_row() {
        let pool = test_pool().await;
        let form_a = registration("racer", "a", "a");
        let form_b = registration("racer", "b", "b");

        let (a, b) = tokio::join!(register(&pool, &form_a), register(&pool, &form_b));
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'racer'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_login_does_not_reveal_which_field_was_wrong() {
        let pool = test_pool().await;
        register(&pool, &registration("ann", "secret", "secret"))
            .await
            .unwrap();

        let wrong_password = rejection(login(&pool, &credentials("ann", "nope")).await);
        let unknown_user = rejection(login(&pool, &credentials("bob", "secret")).await);

        assert_eq!(wrong_password, BAD_CREDENTIALS);
        assert_eq!(wrong_password, unknown_user);
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let pool = test_pool().await;
        assert_eq!(
            rejection(login(&pool, &LoginForm::default()).await),
            "Missing username. Missing password."
        );
        let form = LoginForm {
            username: Some("ann".to_string()),
            password: None,
        };
        assert_eq!(rejection(login(&pool, &form).await), MISSING_PASSWORD);
    }
}
