//! Migration registry and runner with history tracking.
//!
//! # Responsibility
//! - Hold registered migrations keyed by ID in deterministic order.
//! - Apply pending migrations exactly once, tracked in `migration_history`.
//!
//! # Invariants
//! - Execution order is ascending lexicographic ID order, independent of
//!   registration order.
//! - One outer transaction spans the whole run: a failing migration rolls
//!   back every migration applied earlier in the same run.
//! - A history row is inserted in the same savepoint as its migration body.
//! - The resume marker (highest recorded ID) and everything before it are
//!   treated as already applied and never re-run.

use crate::db::{DbError, DbResult};
use log::{debug, info, warn};
use rusqlite::{Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the table recording applied migration IDs.
pub const HISTORY_TABLE: &str = "migration_history";

/// One registered migration body, run against a transactional scope.
pub type MigrationFn = Box<dyn Fn(&Connection) -> DbResult<()>>;

pub type MigrateResult<T> = Result<T, MigrateError>;

/// Migration run errors.
#[derive(Debug)]
pub enum MigrateError {
    /// History bootstrap, marker read, or transaction management failed.
    Db(DbError),
    /// A migration body or its history insert failed; the whole run is
    /// rolled back.
    Failed { id: String, source: DbError },
}

impl Display for MigrateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Failed { id, source } => write!(f, "migration `{id}` failed: {source}"),
        }
    }
}

impl Error for MigrateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Failed { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for MigrateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for MigrateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Ordered collection of migrations, keyed by ID.
///
/// Built once at startup and passed by value into [`MigrationRunner::new`].
/// Registration order does not matter; IDs sort lexicographically.
#[derive(Default)]
pub struct MigrationRegistry {
    migrations: BTreeMap<String, MigrationFn>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one migration under `id`.
    ///
    /// # Contract
    /// - No duplicate-ID validation: the last registration for a given ID
    ///   wins silently.
    pub fn register<F>(&mut self, id: impl Into<String>, migration: F)
    where
        F: Fn(&Connection) -> DbResult<()> + 'static,
    {
        let id = id.into();
        if self.migrations.insert(id.clone(), Box::new(migration)).is_some() {
            debug!("event=migration_register module=db status=replaced id={id}");
        }
    }

    /// Registers a migration that executes a fixed SQL batch.
    pub fn register_sql(&mut self, id: impl Into<String>, sql: &'static str) {
        self.register(id, move |conn| {
            conn.execute_batch(sql)?;
            Ok(())
        });
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Returns registered IDs in execution order.
    pub fn ids(&self) -> Vec<String> {
        self.migrations.keys().cloned().collect()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &MigrationFn)> {
        self.migrations
            .iter()
            .map(|(id, migration)| (id.as_str(), migration))
    }
}

/// Outcome of one runner pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// IDs applied during this run, in execution order.
    pub applied: Vec<String>,
    /// Resume marker found in history before the run, if any.
    pub resume_marker: Option<String>,
    /// True when the resume marker matched no registered ID; in that case
    /// the whole pass stays in skip mode and nothing is applied.
    pub resume_marker_unmatched: bool,
}

impl MigrationReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// Applies registered migrations to a database, each at most once.
pub struct MigrationRunner {
    registry: MigrationRegistry,
}

impl MigrationRunner {
    /// Creates a runner over a fully built registry.
    pub fn new(registry: MigrationRegistry) -> Self {
        Self { registry }
    }

    /// Brings `migration_history` up to date with the registry.
    ///
    /// # Contract
    /// - Ensures the history table exists, even for an empty registry.
    /// - Skips every ID up to and including the resume marker, then applies
    ///   the rest in order inside one outer transaction.
    /// - A marker that matches no registered ID means nothing is applied;
    ///   the report flags this instead of failing.
    ///
    /// # Errors
    /// - [`MigrateError::Failed`] when a migration body or history insert
    ///   fails; the outer transaction rolls back and no migration from this
    ///   run remains visible.
    pub fn run(&self, conn: &mut Connection) -> MigrateResult<MigrationReport> {
        ensure_history_table(conn)?;
        let resume_marker = read_resume_marker(conn)?;

        let mut report = MigrationReport {
            resume_marker: resume_marker.clone(),
            ..MigrationReport::default()
        };

        if self.registry.is_empty() {
            info!("event=migrate module=db status=noop reason=empty_registry");
            return Ok(report);
        }

        info!(
            "event=migrate module=db status=start registered={} resume_marker={}",
            self.registry.len(),
            resume_marker.as_deref().unwrap_or("none")
        );

        let mut tx = conn.transaction()?;
        // `skipping` holds the marker while scanning for it; clearing it is
        // the single SKIPPING -> APPLYING transition of a run.
        let mut skipping = resume_marker;

        for (id, migration) in self.registry.iter() {
            if let Some(marker) = skipping.as_deref() {
                if id == marker {
                    skipping = None;
                }
                // The marker's own migration is already applied; skip it too.
                continue;
            }

            let savepoint = tx.savepoint().map_err(DbError::from)?;
            migration(&savepoint).map_err(|source| MigrateError::Failed {
                id: id.to_string(),
                source,
            })?;
            savepoint
                .execute(
                    "INSERT INTO migration_history (migration_id) VALUES (?1);",
                    [id],
                )
                .map_err(|err| MigrateError::Failed {
                    id: id.to_string(),
                    source: err.into(),
                })?;
            savepoint.commit().map_err(|err| MigrateError::Failed {
                id: id.to_string(),
                source: err.into(),
            })?;

            info!("event=migrate_apply module=db status=ok id={id}");
            report.applied.push(id.to_string());
        }

        tx.commit()?;

        if skipping.is_some() {
            // The loop never found the marker among registered IDs, so it
            // never left skip mode. Preserved behavior: zero migrations run.
            report.resume_marker_unmatched = true;
            warn!(
                "event=migrate module=db status=warn reason=resume_marker_unmatched marker={}",
                report.resume_marker.as_deref().unwrap_or("none")
            );
        } else {
            info!(
                "event=migrate module=db status=ok applied={}",
                report.applied_count()
            );
        }

        Ok(report)
    }
}

fn ensure_history_table(conn: &Connection) -> MigrateResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {HISTORY_TABLE} (
            migration_id TEXT PRIMARY KEY NOT NULL
        );"
    ))?;
    Ok(())
}

fn read_resume_marker(conn: &Connection) -> MigrateResult<Option<String>> {
    let marker = conn
        .query_row(
            &format!(
                "SELECT migration_id FROM {HISTORY_TABLE}
                 ORDER BY migration_id DESC
                 LIMIT 1;"
            ),
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(marker)
}
