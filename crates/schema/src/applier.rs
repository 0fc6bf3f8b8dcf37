//! The schema applier: connect once, apply pending steps in order inside a
//! single transaction, report per-step outcomes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rotadb_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::DeployError;
use crate::ledger;
use crate::steps::{STEPS, Step};
use crate::verify::VerificationReport;

/// What happened to a step during an apply run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The statement ran in this invocation.
    Applied { rows_affected: u64 },
    /// The ledger already recorded this step.
    Skipped,
}

/// Per-step result of an apply run, in deployment order.
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    pub step: &'static Step,
    pub outcome: StepOutcome,
}

/// Ledger state of a step, for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct StepState {
    pub id: &'static str,
    pub summary: &'static str,
    pub applied_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct Applier {
    pool: PgPool,
}

impl Applier {
    /// Connect to the target database.
    pub async fn connect(database_url: &str) -> Result<Self, DeployError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .connect(database_url)
            .await
            .map_err(DeployError::Connect)?;
        tracing::debug!("connected to target database");
        Ok(Self { pool })
    }

    /// Apply every step the ledger does not record yet, in order, inside a
    /// single transaction committed once at the end.
    ///
    /// The first failing statement aborts the run; the transaction rolls
    /// back when dropped, so a failed run leaves no ledger entries behind.
    pub async fn apply(&self) -> Result<Vec<StepReport>, DeployError> {
        let mut tx = self.pool.begin().await.map_err(DeployError::Transaction)?;
        ledger::ensure(&mut tx).await?;
        let applied = ledger::applied(&mut *tx).await?;

        let mut reports = Vec::with_capacity(STEPS.len());
        for step in STEPS {
            if applied.contains_key(step.id) {
                tracing::info!(step = step.id, "step already applied, skipping");
                reports.push(StepReport { step, outcome: StepOutcome::Skipped });
                continue;
            }
            tracing::info!(step = step.id, "applying step");
            let result = sqlx::query(step.sql)
                .execute(&mut *tx)
                .await
                .map_err(|source| DeployError::Step { step: step.id, source })?;
            ledger::record(&mut tx, step.id).await?;
            reports.push(StepReport {
                step,
                outcome: StepOutcome::Applied { rows_affected: result.rows_affected() },
            });
        }

        tx.commit().await.map_err(DeployError::Transaction)?;
        tracing::info!(steps = reports.len(), "schema deployment committed");
        Ok(reports)
    }

    /// Read-only verification: do the two tables and the username column
    /// exist.
    pub async fn verify(&self) -> Result<VerificationReport, DeployError> {
        VerificationReport::fetch(&self.pool).await
    }

    /// Ledger state for every step, without touching the schema. Against a
    /// database that has never been deployed to, every step reports pending.
    pub async fn status(&self) -> Result<Vec<StepState>, DeployError> {
        let applied = if ledger::exists(&self.pool).await? {
            ledger::applied(&self.pool).await?
        } else {
            HashMap::new()
        };
        Ok(STEPS
            .iter()
            .map(|step| StepState {
                id: step.id,
                summary: step.summary,
                applied_at: applied.get(step.id).copied(),
            })
            .collect())
    }

    /// Close the pool, releasing the connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
