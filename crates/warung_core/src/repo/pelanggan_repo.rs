//! Customer repository contract and SQLite implementation.

use crate::model::pelanggan::Pelanggan;
use crate::repo::supplier_repo::paginate;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const PELANGGAN_SELECT_SQL: &str = "SELECT id, nama, alamat, telepon FROM pelanggan";

/// Repository interface for customer CRUD operations.
pub trait PelangganRepository {
    fn insert(&self, pelanggan: &Pelanggan) -> RepoResult<()>;
    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Pelanggan>>;
    fn get(&self, id: Uuid) -> RepoResult<Option<Pelanggan>>;
    fn update(&self, pelanggan: &Pelanggan) -> RepoResult<()>;
    fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed customer repository.
pub struct SqlitePelangganRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePelangganRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PelangganRepository for SqlitePelangganRepository<'_> {
    fn insert(&self, pelanggan: &Pelanggan) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO pelanggan (id, nama, alamat, telepon, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4,
                     (strftime('%s', 'now') * 1000),
                     (strftime('%s', 'now') * 1000));",
            params![
                pelanggan.id.to_string(),
                pelanggan.nama.as_str(),
                pelanggan.alamat.as_str(),
                pelanggan.telepon.as_str(),
            ],
        )?;
        Ok(())
    }

    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Pelanggan>> {
        let (sql, bind_values) = paginate(
            &format!("{PELANGGAN_SELECT_SQL} ORDER BY nama ASC, id ASC"),
            limit,
            offset,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_pelanggan_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Pelanggan>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PELANGGAN_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pelanggan_row(row)?));
        }
        Ok(None)
    }

    fn update(&self, pelanggan: &Pelanggan) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pelanggan
             SET
                nama = ?1,
                alamat = ?2,
                telepon = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                pelanggan.nama.as_str(),
                pelanggan.alamat.as_str(),
                pelanggan.telepon.as_str(),
                pelanggan.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "pelanggan",
                id: pelanggan.id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM pelanggan WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "pelanggan",
                id,
            });
        }
        Ok(())
    }
}

fn parse_pelanggan_row(row: &Row<'_>) -> RepoResult<Pelanggan> {
    let id_text: String = row.get("id")?;
    Ok(Pelanggan {
        id: parse_uuid_column(&id_text, "pelanggan", "id")?,
        nama: row.get("nama")?,
        alamat: row.get("alamat")?,
        telepon: row.get("telepon")?,
    })
}
