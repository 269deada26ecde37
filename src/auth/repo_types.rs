use sqlx::FromRow;
use time::OffsetDateTime;

use crate::auth::password::PasswordDigest;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,                // normalised, unique
    #[sqlx(rename = "password_hash")]
    pub password: PasswordDigest,
    pub created_at: OffsetDateTime,
}
