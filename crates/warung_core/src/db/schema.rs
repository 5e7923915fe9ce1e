//! Entity auto-schema step.
//!
//! # Responsibility
//! - Ensure each declared entity table exists with its declared columns.
//!
//! # Invariants
//! - Best-effort: runs after the migration pass, outside migration history,
//!   and a failing table does not stop the remaining tables.
//! - Idempotent: re-applying a matching schema is a no-op.
//! - Existing columns are never altered or dropped; only missing columns
//!   are added.

use crate::db::DbResult;
use log::{error, info};
use rusqlite::Connection;

/// One column declaration: `decl` is the full SQL fragment starting with
/// `name`, constant-default only so it stays valid for `ADD COLUMN`.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub decl: &'static str,
}

/// One entity table with its declared column set.
#[derive(Debug, Clone, Copy)]
pub struct EntityTable {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

const COMMON_TIMESTAMPS: [ColumnDef; 2] = [
    ColumnDef {
        name: "created_at",
        decl: "created_at INTEGER NOT NULL DEFAULT 0",
    },
    ColumnDef {
        name: "updated_at",
        decl: "updated_at INTEGER NOT NULL DEFAULT 0",
    },
];

/// Fixed list of entity tables covered by the auto-schema step.
pub const ENTITY_TABLES: &[EntityTable] = &[
    EntityTable {
        name: "supplier",
        columns: &[
            ColumnDef {
                name: "id",
                decl: "id TEXT PRIMARY KEY NOT NULL",
            },
            ColumnDef {
                name: "nama",
                decl: "nama TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "alamat",
                decl: "alamat TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "telepon",
                decl: "telepon TEXT NOT NULL DEFAULT ''",
            },
            COMMON_TIMESTAMPS[0],
            COMMON_TIMESTAMPS[1],
        ],
    },
    EntityTable {
        name: "produk",
        columns: &[
            ColumnDef {
                name: "id",
                decl: "id TEXT PRIMARY KEY NOT NULL",
            },
            ColumnDef {
                name: "nama",
                decl: "nama TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "harga",
                decl: "harga INTEGER NOT NULL DEFAULT 0",
            },
            ColumnDef {
                name: "stok",
                decl: "stok INTEGER NOT NULL DEFAULT 0",
            },
            ColumnDef {
                name: "supplier_id",
                decl: "supplier_id TEXT",
            },
            COMMON_TIMESTAMPS[0],
            COMMON_TIMESTAMPS[1],
        ],
    },
    EntityTable {
        name: "pelanggan",
        columns: &[
            ColumnDef {
                name: "id",
                decl: "id TEXT PRIMARY KEY NOT NULL",
            },
            ColumnDef {
                name: "nama",
                decl: "nama TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "alamat",
                decl: "alamat TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "telepon",
                decl: "telepon TEXT NOT NULL DEFAULT ''",
            },
            COMMON_TIMESTAMPS[0],
            COMMON_TIMESTAMPS[1],
        ],
    },
    EntityTable {
        name: "transaksi",
        columns: &[
            ColumnDef {
                name: "id",
                decl: "id TEXT PRIMARY KEY NOT NULL",
            },
            ColumnDef {
                name: "pelanggan_id",
                decl: "pelanggan_id TEXT",
            },
            ColumnDef {
                name: "tanggal",
                decl: "tanggal INTEGER NOT NULL DEFAULT 0",
            },
            ColumnDef {
                name: "total",
                decl: "total INTEGER NOT NULL DEFAULT 0",
            },
            COMMON_TIMESTAMPS[0],
            COMMON_TIMESTAMPS[1],
        ],
    },
    EntityTable {
        name: "transaksi_detail",
        columns: &[
            ColumnDef {
                name: "id",
                decl: "id TEXT PRIMARY KEY NOT NULL",
            },
            ColumnDef {
                name: "transaksi_id",
                decl: "transaksi_id TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "produk_id",
                decl: "produk_id TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "jumlah",
                decl: "jumlah INTEGER NOT NULL DEFAULT 0",
            },
            ColumnDef {
                name: "subtotal",
                decl: "subtotal INTEGER NOT NULL DEFAULT 0",
            },
        ],
    },
    EntityTable {
        name: "pembayaran",
        columns: &[
            ColumnDef {
                name: "id",
                decl: "id TEXT PRIMARY KEY NOT NULL",
            },
            ColumnDef {
                name: "transaksi_id",
                decl: "transaksi_id TEXT NOT NULL DEFAULT ''",
            },
            ColumnDef {
                name: "metode",
                decl: "metode TEXT NOT NULL DEFAULT 'tunai'",
            },
            ColumnDef {
                name: "jumlah",
                decl: "jumlah INTEGER NOT NULL DEFAULT 0",
            },
            ColumnDef {
                name: "tanggal",
                decl: "tanggal INTEGER NOT NULL DEFAULT 0",
            },
        ],
    },
];

/// Outcome of one auto-schema pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// Tables created from scratch.
    pub created: Vec<&'static str>,
    /// Columns added to existing tables, as `table.column`.
    pub added_columns: Vec<String>,
    /// Tables whose reconciliation failed; errors are logged, not returned.
    pub failed: Vec<&'static str>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ensures every declared entity table exists with its declared columns.
///
/// # Side effects
/// - Emits one `auto_schema` event per table plus a summary event.
pub fn ensure_entity_tables(conn: &Connection) -> SchemaReport {
    let mut report = SchemaReport::default();

    for table in ENTITY_TABLES {
        match ensure_table(conn, table) {
            Ok(TableChange::Created) => {
                info!(
                    "event=auto_schema module=db status=ok table={} change=created",
                    table.name
                );
                report.created.push(table.name);
            }
            Ok(TableChange::ColumnsAdded(columns)) => {
                info!(
                    "event=auto_schema module=db status=ok table={} change=columns_added count={}",
                    table.name,
                    columns.len()
                );
                for column in columns {
                    report.added_columns.push(format!("{}.{column}", table.name));
                }
            }
            Ok(TableChange::Unchanged) => {
                info!(
                    "event=auto_schema module=db status=ok table={} change=none",
                    table.name
                );
            }
            Err(err) => {
                error!(
                    "event=auto_schema module=db status=error table={} error={err}",
                    table.name
                );
                report.failed.push(table.name);
            }
        }
    }

    info!(
        "event=auto_schema module=db status={} created={} added_columns={} failed={}",
        if report.is_clean() { "ok" } else { "partial" },
        report.created.len(),
        report.added_columns.len(),
        report.failed.len()
    );

    report
}

enum TableChange {
    Created,
    ColumnsAdded(Vec<&'static str>),
    Unchanged,
}

fn ensure_table(conn: &Connection, table: &EntityTable) -> DbResult<TableChange> {
    if !table_exists(conn, table.name)? {
        let decls = table
            .columns
            .iter()
            .map(|column| column.decl)
            .collect::<Vec<_>>()
            .join(",\n    ");
        conn.execute_batch(&format!(
            "CREATE TABLE {} (\n    {decls}\n);",
            table.name
        ))?;
        return Ok(TableChange::Created);
    }

    let existing = existing_columns(conn, table.name)?;
    let mut added = Vec::new();
    for column in table.columns {
        if existing.iter().any(|name| name == column.name) {
            continue;
        }
        conn.execute_batch(&format!(
            "ALTER TABLE {} ADD COLUMN {};",
            table.name, column.decl
        ))?;
        added.push(column.name);
    }

    if added.is_empty() {
        Ok(TableChange::Unchanged)
    } else {
        Ok(TableChange::ColumnsAdded(added))
    }
}

fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn existing_columns(conn: &Connection, table_name: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table_name});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }
    Ok(columns)
}
