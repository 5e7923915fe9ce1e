//! Payment repository contract and SQLite implementation.

use crate::model::pembayaran::{MetodePembayaran, Pembayaran};
use crate::repo::supplier_repo::paginate;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const PEMBAYARAN_SELECT_SQL: &str =
    "SELECT id, transaksi_id, metode, jumlah, tanggal FROM pembayaran";

/// Repository interface for payment CRUD operations.
pub trait PembayaranRepository {
    fn insert(&self, pembayaran: &Pembayaran) -> RepoResult<()>;
    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Pembayaran>>;
    fn get(&self, id: Uuid) -> RepoResult<Option<Pembayaran>>;
    fn update(&self, pembayaran: &Pembayaran) -> RepoResult<()>;
    fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed payment repository.
pub struct SqlitePembayaranRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePembayaranRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PembayaranRepository for SqlitePembayaranRepository<'_> {
    fn insert(&self, pembayaran: &Pembayaran) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO pembayaran (id, transaksi_id, metode, jumlah, tanggal)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                pembayaran.id.to_string(),
                pembayaran.transaksi_id.to_string(),
                pembayaran.metode.as_code(),
                pembayaran.jumlah,
                pembayaran.tanggal,
            ],
        )?;
        Ok(())
    }

    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Pembayaran>> {
        let (sql, bind_values) = paginate(
            &format!("{PEMBAYARAN_SELECT_SQL} ORDER BY tanggal DESC, id ASC"),
            limit,
            offset,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_pembayaran_row(row)?);
        }
        Ok(items)
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Pembayaran>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PEMBAYARAN_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_pembayaran_row(row)?));
        }
        Ok(None)
    }

    fn update(&self, pembayaran: &Pembayaran) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pembayaran
             SET
                transaksi_id = ?1,
                metode = ?2,
                jumlah = ?3,
                tanggal = ?4
             WHERE id = ?5;",
            params![
                pembayaran.transaksi_id.to_string(),
                pembayaran.metode.as_code(),
                pembayaran.jumlah,
                pembayaran.tanggal,
                pembayaran.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "pembayaran",
                id: pembayaran.id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM pembayaran WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "pembayaran",
                id,
            });
        }
        Ok(())
    }
}

fn parse_pembayaran_row(row: &Row<'_>) -> RepoResult<Pembayaran> {
    let id_text: String = row.get("id")?;
    let transaksi_id_text: String = row.get("transaksi_id")?;
    let metode_text: String = row.get("metode")?;
    let metode = MetodePembayaran::parse_code(&metode_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid payment method `{metode_text}` in pembayaran.metode"
        ))
    })?;

    Ok(Pembayaran {
        id: parse_uuid_column(&id_text, "pembayaran", "id")?,
        transaksi_id: parse_uuid_column(&transaksi_id_text, "pembayaran", "transaksi_id")?,
        metode,
        jumlah: row.get("jumlah")?,
        tanggal: row.get("tanggal")?,
    })
}
