//! The fixed, ordered list of schema steps.
//!
//! Every statement is safe to re-run against a database that may already be
//! partially or fully migrated: DDL is guarded by `IF NOT EXISTS` and the
//! backfill only touches rows still missing a username.

/// A single schema operation with a stable identifier.
#[derive(Debug)]
pub struct Step {
    /// Stable id recorded in the migration ledger.
    pub id: &'static str,
    /// Past-tense line for operator output.
    pub summary: &'static str,
    pub sql: &'static str,
}

/// Deployment order: tables before their indexes, the username column
/// before its backfill.
pub const STEPS: &[Step] = &[
    Step {
        id: "create_login_audit",
        summary: "Created login_audit table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS public.login_audit (
                id BIGSERIAL PRIMARY KEY,
                user_id UUID,
                username TEXT NOT NULL,
                ip_hash TEXT NOT NULL,
                user_agent_hash TEXT NOT NULL,
                login_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL,
                failure_reason TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#,
    },
    Step {
        id: "create_login_rate_limiting",
        summary: "Created login_rate_limiting table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS public.login_rate_limiting (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL,
                ip_hash TEXT NOT NULL,
                attempt_count INTEGER NOT NULL DEFAULT 1,
                first_attempt_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_attempt_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                locked_until TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                UNIQUE (username, ip_hash)
            )
        "#,
    },
    Step {
        id: "add_users_username",
        summary: "Added username column to users table",
        sql: "ALTER TABLE public.users ADD COLUMN IF NOT EXISTS username TEXT UNIQUE",
    },
    Step {
        id: "backfill_usernames",
        summary: "Backfilled usernames",
        sql: r#"
            UPDATE public.users
            SET username = LOWER('user_' || SUBSTRING(id::text, 1, 8))
            WHERE username IS NULL
        "#,
    },
    Step {
        id: "index_login_audit_user_id_login_at",
        summary: "Created index on login_audit",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_login_audit_user_id_login_at
                ON public.login_audit (user_id, login_at DESC)
        "#,
    },
    Step {
        id: "index_login_rate_limiting_locked_until",
        summary: "Created index on login_rate_limiting",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_login_rate_limiting_locked_until
                ON public.login_rate_limiting (locked_until)
        "#,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn step_ids_are_unique() {
        let ids: HashSet<_> = STEPS.iter().map(|step| step.id).collect();
        assert_eq!(ids.len(), STEPS.len());
    }

    #[test]
    fn every_step_is_rerun_safe() {
        for step in STEPS {
            let guarded =
                step.sql.contains("IF NOT EXISTS") || step.sql.contains("WHERE username IS NULL");
            assert!(guarded, "step '{}' has no idempotence guard", step.id);
        }
    }

    #[test]
    fn tables_precede_dependent_steps() {
        let position = |id: &str| STEPS.iter().position(|step| step.id == id).unwrap();
        assert!(position("create_login_audit") < position("index_login_audit_user_id_login_at"));
        assert!(
            position("create_login_rate_limiting")
                < position("index_login_rate_limiting_locked_until")
        );
        assert!(position("add_users_username") < position("backfill_usernames"));
    }

    #[test]
    fn backfill_derives_lowercased_prefixed_username() {
        let backfill = STEPS.iter().find(|step| step.id == "backfill_usernames").unwrap();
        assert!(backfill.sql.contains("LOWER('user_' || SUBSTRING(id::text, 1, 8))"));
    }
}
