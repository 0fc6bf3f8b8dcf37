//! Typed error enum for the schema applier.
//!
//! Every variant carries the underlying `sqlx::Error` as a source, and
//! `Step` names the exact schema step that aborted the run so the operator
//! learns what failed, not just that something did.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// Could not open a connection to the target database.
    #[error("failed to connect to the target database: {0}")]
    Connect(#[source] sqlx::Error),

    /// A schema statement failed; all later steps are abandoned.
    #[error("schema step '{step}' failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The applied-step ledger could not be read or written.
    #[error("migration ledger error: {0}")]
    Ledger(#[source] sqlx::Error),

    /// Opening or committing the deployment transaction failed.
    #[error("transaction error: {0}")]
    Transaction(#[source] sqlx::Error),

    /// The read-only verification query failed.
    #[error("verification query failed: {0}")]
    Verification(#[source] sqlx::Error),
}
