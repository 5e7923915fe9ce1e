//! One-off migration entry point.
//!
//! # Responsibility
//! - Bring a warung database up to date: apply the baseline migration
//!   registry, then reconcile entity tables via the auto-schema step.
//! - Exit non-zero after logging when any unrecoverable step fails.
//!
//! Configuration comes from the environment:
//! - `WARUNG_DB_PATH`  — database file (default `warung.db`)
//! - `WARUNG_LOG_DIR`  — absolute log directory; stderr logging when unset
//! - `WARUNG_LOG_LEVEL` — log level (default per build mode)

use log::{error, info};
use std::error::Error;
use warung_core::{
    baseline_registry, default_log_level, ensure_entity_tables, init_logging, init_stderr_logging,
    open_db, MigrationRunner, ENTITY_TABLES,
};

fn main() {
    let level = std::env::var("WARUNG_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    let log_init = match std::env::var("WARUNG_LOG_DIR") {
        Ok(dir) => init_logging(&level, &dir),
        Err(_) => init_stderr_logging(&level),
    };
    if let Err(err) = log_init {
        eprintln!("warung-migrate: failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run() {
        error!("event=migrate_cli module=cli status=error error={err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::var("WARUNG_DB_PATH").unwrap_or_else(|_| "warung.db".to_string());
    info!("event=migrate_cli module=cli status=start db_path={db_path}");

    let mut conn = open_db(&db_path)?;

    let runner = MigrationRunner::new(baseline_registry());
    let report = runner.run(&mut conn)?;
    info!(
        "event=migrate_cli module=cli status=ok applied={} resume_marker={}",
        report.applied_count(),
        report.resume_marker.as_deref().unwrap_or("none")
    );

    info!("event=auto_schema_cli module=cli status=start tables={}", ENTITY_TABLES.len());
    for table in ENTITY_TABLES {
        info!("event=auto_schema_cli module=cli table={}", table.name);
    }
    let schema_report = ensure_entity_tables(&conn);
    if !schema_report.is_clean() {
        // Best-effort step: failures are logged per table, not fatal.
        error!(
            "event=auto_schema_cli module=cli status=partial failed={}",
            schema_report.failed.len()
        );
    }

    info!("event=migrate_cli module=cli status=done");
    Ok(())
}
