use std::fmt;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    /// Digest with the same parameters as real ones, verified against when
    /// the account does not exist so both login failures cost one hash.
    static ref DUMMY_DIGEST: Option<PasswordDigest> =
        hash_password("no-such-account-placeholder").ok();
}

/// Argon2 PHC string for a user's password.
///
/// Opaque on purpose: no `Serialize`, no `Display`, and a redacted `Debug`,
/// so it cannot end up in logs, JSON views or the export file.
#[derive(Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

pub fn hash_password(plain: &str) -> anyhow::Result<PasswordDigest> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(PasswordDigest(hash))
}

pub fn verify_password(plain: &str, digest: &PasswordDigest) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(digest.as_phc()).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Spend one argon2 verification without a real account. Always `false`.
pub fn verify_dummy(plain: &str) -> bool {
    if let Some(digest) = DUMMY_DIGEST.as_ref() {
        let _ = verify_password(plain, digest);
    }
    false
}
