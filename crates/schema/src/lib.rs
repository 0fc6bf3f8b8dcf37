//! Schema applier for the rota login-hardening deployment
//!
//! Applies a fixed, ordered list of idempotent schema steps to a PostgreSQL
//! database, records each applied step in a ledger table, commits once, and
//! verifies the result with a read-only query.

mod applier;
mod error;
mod ledger;
mod steps;
mod verify;

pub use applier::{Applier, StepOutcome, StepReport, StepState};
pub use error::DeployError;
pub use steps::{STEPS, Step};
pub use verify::VerificationReport;
