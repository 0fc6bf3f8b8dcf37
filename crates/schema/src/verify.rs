//! Post-deployment verification.

use std::fmt;

use serde::Serialize;
use sqlx::{PgPool, Row};

use crate::error::DeployError;

const VERIFY_SQL: &str = r#"
    SELECT
        EXISTS(
            SELECT 1 FROM information_schema.tables
            WHERE table_name = 'login_audit' AND table_schema = 'public'
        ) AS login_audit_exists,
        EXISTS(
            SELECT 1 FROM information_schema.tables
            WHERE table_name = 'login_rate_limiting' AND table_schema = 'public'
        ) AS rate_limiting_exists,
        EXISTS(
            SELECT 1 FROM information_schema.columns
            WHERE table_name = 'users' AND column_name = 'username'
        ) AS username_exists
"#;

/// Presence of the three deployed objects, straight from
/// `information_schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub login_audit: bool,
    pub login_rate_limiting: bool,
    pub users_username: bool,
}

impl VerificationReport {
    pub(crate) async fn fetch(pool: &PgPool) -> Result<Self, DeployError> {
        let row =
            sqlx::query(VERIFY_SQL).fetch_one(pool).await.map_err(DeployError::Verification)?;
        Ok(Self {
            login_audit: row.try_get("login_audit_exists").map_err(DeployError::Verification)?,
            login_rate_limiting: row
                .try_get("rate_limiting_exists")
                .map_err(DeployError::Verification)?,
            users_username: row.try_get("username_exists").map_err(DeployError::Verification)?,
        })
    }

    /// True only when every deployed object is present.
    pub fn all_present(&self) -> bool {
        self.login_audit && self.login_rate_limiting && self.users_username
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.login_audit, self.login_rate_limiting, self.users_username)
    }
}
