//! Product repository contract and SQLite implementation.

use crate::model::produk::Produk;
use crate::repo::supplier_repo::paginate;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const PRODUK_SELECT_SQL: &str = "SELECT id, nama, harga, stok, supplier_id FROM produk";

/// Repository interface for product CRUD operations.
pub trait ProdukRepository {
    fn insert(&self, produk: &Produk) -> RepoResult<()>;
    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Produk>>;
    fn get(&self, id: Uuid) -> RepoResult<Option<Produk>>;
    fn update(&self, produk: &Produk) -> RepoResult<()>;
    fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProdukRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProdukRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProdukRepository for SqliteProdukRepository<'_> {
    fn insert(&self, produk: &Produk) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO produk (id, nama, harga, stok, supplier_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5,
                     (strftime('%s', 'now') * 1000),
                     (strftime('%s', 'now') * 1000));",
            params![
                produk.id.to_string(),
                produk.nama.as_str(),
                produk.harga,
                produk.stok,
                produk.supplier_id.map(|id| id.to_string()),
            ],
        )?;
        Ok(())
    }

    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Produk>> {
        let (sql, bind_values) = paginate(
            &format!("{PRODUK_SELECT_SQL} ORDER BY nama ASC, id ASC"),
            limit,
            offset,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_produk_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Produk>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_produk_row(row)?));
        }
        Ok(None)
    }

    fn update(&self, produk: &Produk) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE produk
             SET
                nama = ?1,
                harga = ?2,
                stok = ?3,
                supplier_id = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                produk.nama.as_str(),
                produk.harga,
                produk.stok,
                produk.supplier_id.map(|id| id.to_string()),
                produk.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "produk",
                id: produk.id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM produk WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "produk",
                id,
            });
        }
        Ok(())
    }
}

fn parse_produk_row(row: &Row<'_>) -> RepoResult<Produk> {
    let id_text: String = row.get("id")?;
    let supplier_id = match row.get::<_, Option<String>>("supplier_id")? {
        Some(value) => Some(parse_uuid_column(&value, "produk", "supplier_id")?),
        None => None,
    };

    Ok(Produk {
        id: parse_uuid_column(&id_text, "produk", "id")?,
        nama: row.get("nama")?,
        harga: row.get("harga")?,
        stok: row.get("stok")?,
        supplier_id,
    })
}
