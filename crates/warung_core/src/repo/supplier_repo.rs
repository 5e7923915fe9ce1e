//! Supplier repository contract and SQLite implementation.
//!
//! # Invariants
//! - `insert` never overwrites an existing row; ID collisions surface as
//!   constraint errors.
//! - `update`/`delete` report `NotFound` when no row is affected.

use crate::model::supplier::Supplier;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const SUPPLIER_SELECT_SQL: &str = "SELECT id, nama, alamat, telepon FROM supplier";

/// Repository interface for supplier CRUD operations.
pub trait SupplierRepository {
    fn insert(&self, supplier: &Supplier) -> RepoResult<()>;
    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Supplier>>;
    fn get(&self, id: Uuid) -> RepoResult<Option<Supplier>>;
    fn update(&self, supplier: &Supplier) -> RepoResult<()>;
    fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed supplier repository.
pub struct SqliteSupplierRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSupplierRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SupplierRepository for SqliteSupplierRepository<'_> {
    fn insert(&self, supplier: &Supplier) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO supplier (id, nama, alamat, telepon, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4,
                     (strftime('%s', 'now') * 1000),
                     (strftime('%s', 'now') * 1000));",
            params![
                supplier.id.to_string(),
                supplier.nama.as_str(),
                supplier.alamat.as_str(),
                supplier.telepon.as_str(),
            ],
        )?;
        Ok(())
    }

    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Supplier>> {
        let (sql, bind_values) = paginate(&format!("{SUPPLIER_SELECT_SQL} ORDER BY nama ASC, id ASC"), limit, offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut suppliers = Vec::new();
        while let Some(row) = rows.next()? {
            suppliers.push(parse_supplier_row(row)?);
        }
        Ok(suppliers)
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Supplier>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUPPLIER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_supplier_row(row)?));
        }
        Ok(None)
    }

    fn update(&self, supplier: &Supplier) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE supplier
             SET
                nama = ?1,
                alamat = ?2,
                telepon = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                supplier.nama.as_str(),
                supplier.alamat.as_str(),
                supplier.telepon.as_str(),
                supplier.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "supplier",
                id: supplier.id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM supplier WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "supplier",
                id,
            });
        }
        Ok(())
    }
}

fn parse_supplier_row(row: &Row<'_>) -> RepoResult<Supplier> {
    let id_text: String = row.get("id")?;
    Ok(Supplier {
        id: parse_uuid_column(&id_text, "supplier", "id")?,
        nama: row.get("nama")?,
        alamat: row.get("alamat")?,
        telepon: row.get("telepon")?,
    })
}

/// Appends LIMIT/OFFSET clauses and their bind values to a base query.
pub(crate) fn paginate(base_sql: &str, limit: Option<u32>, offset: u32) -> (String, Vec<Value>) {
    let mut sql = base_sql.to_string();
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(offset)));
        }
    } else if offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(offset)));
    }

    sql.push(';');
    (sql, bind_values)
}
