use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    auth::{
        extractors::{AuthSession, SESSION_USER_KEY},
        password::{hash_password, verify_dummy, verify_password},
        repo::is_unique_violation,
        repo_types::User,
    },
    error::AppError,
};

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create a user account.
pub async fn register(
    db: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let name = name.trim();
    let email = normalize_email(email);

    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if User::find_by_email(db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let digest = hash_password(password)?;
    let user = match User::create(db, name, &email, &digest).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email registered concurrently");
            return Err(AppError::DuplicateEmail);
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Check an email/password pair. Unknown email and wrong password return the
/// same error after the same argon2 work.
pub async fn authenticate(db: &SqlitePool, email: &str, password: &str) -> Result<User, AppError> {
    let email = normalize_email(email);

    let Some(user) = User::find_by_email(db, &email).await? else {
        verify_dummy(password);
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password)? {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

/// Authenticate and bind the session to the user. The session id is rotated
/// so an id issued before login cannot be reused afterwards.
pub async fn login(
    db: &SqlitePool,
    session: &Session,
    email: &str,
    password: &str,
) -> Result<AuthSession, AppError> {
    let user = authenticate(db, email, password).await?;

    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user.id).await?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(AuthSession { user_id: user.id })
}

/// Drop everything held in the session, including the user binding.
pub async fn logout(session: &Session, auth: AuthSession) -> Result<(), AppError> {
    session.flush().await?;
    info!(user_id = auth.user_id, "user logged out");
    Ok(())
}
