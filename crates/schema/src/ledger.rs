//! Applied-step ledger.
//!
//! `schema_migrations` records the id of every step that has run, so a
//! re-invocation skips completed work instead of relying solely on the
//! per-statement guards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::error::DeployError;

const CREATE_LEDGER_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS public.schema_migrations (
        step_id TEXT PRIMARY KEY,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Create the ledger table inside the deployment transaction on first run.
pub(crate) async fn ensure(tx: &mut Transaction<'_, Postgres>) -> Result<(), DeployError> {
    sqlx::query(CREATE_LEDGER_SQL).execute(&mut **tx).await.map_err(DeployError::Ledger)?;
    Ok(())
}

/// Step ids already recorded, with their apply timestamps.
pub(crate) async fn applied<'e, E>(
    executor: E,
) -> Result<HashMap<String, DateTime<Utc>>, DeployError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query("SELECT step_id, applied_at FROM public.schema_migrations")
        .fetch_all(executor)
        .await
        .map_err(DeployError::Ledger)?;
    rows.iter()
        .map(|row| Ok((row.try_get("step_id")?, row.try_get("applied_at")?)))
        .collect::<Result<_, sqlx::Error>>()
        .map_err(DeployError::Ledger)
}

/// Record a step as applied. Runs in the same transaction as the step
/// itself, so a failed run leaves no entry behind.
pub(crate) async fn record(
    tx: &mut Transaction<'_, Postgres>,
    step_id: &str,
) -> Result<(), DeployError> {
    sqlx::query("INSERT INTO public.schema_migrations (step_id) VALUES ($1)")
        .bind(step_id)
        .execute(&mut **tx)
        .await
        .map_err(DeployError::Ledger)?;
    Ok(())
}

/// Whether the ledger table exists. Read-only callers use this to avoid
/// creating schema as a side effect of a status query.
pub(crate) async fn exists(pool: &PgPool) -> Result<bool, DeployError> {
    let row = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = 'schema_migrations'
        ) AS ledger_exists
        "#,
    )
    .fetch_one(pool)
    .await
    .map_err(DeployError::Ledger)?;
    row.try_get("ledger_exists").map_err(DeployError::Ledger)
}
