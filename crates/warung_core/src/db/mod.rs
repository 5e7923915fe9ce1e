//! SQLite storage bootstrap, migration runner and entity auto-schema.
//!
//! # Responsibility
//! - Open and configure SQLite connections for warung core.
//! - Apply registered migrations in deterministic order with history tracking.
//! - Keep entity tables in sync with declared column sets (best effort).
//!
//! # Invariants
//! - Applied migrations are tracked in the `migration_history` table.
//! - Core code must not read/write entity data before the runner and the
//!   auto-schema step have run.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrate;
pub mod migrations;
mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage transport error for connection bootstrap and SQL execution.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
