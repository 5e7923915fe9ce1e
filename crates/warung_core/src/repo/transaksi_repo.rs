//! Transaction repository contract and SQLite implementation.
//!
//! # Invariants
//! - Header and detail rows are written and deleted atomically.
//! - Detail rows always reference their parent `transaksi_id`.

use crate::model::transaksi::{Transaksi, TransaksiDetail};
use crate::repo::supplier_repo::paginate;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const TRANSAKSI_SELECT_SQL: &str = "SELECT id, pelanggan_id, tanggal, total FROM transaksi";
const DETAIL_SELECT_SQL: &str =
    "SELECT id, transaksi_id, produk_id, jumlah, subtotal FROM transaksi_detail";

/// Repository interface for transaction CRUD operations.
pub trait TransaksiRepository {
    fn insert(&self, transaksi: &Transaksi) -> RepoResult<()>;
    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Transaksi>>;
    fn get(&self, id: Uuid) -> RepoResult<Option<Transaksi>>;
    fn update(&self, transaksi: &Transaksi) -> RepoResult<()>;
    fn delete(&self, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed transaction repository.
pub struct SqliteTransaksiRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTransaksiRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_details(&self, transaksi_id: Uuid) -> RepoResult<Vec<TransaksiDetail>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DETAIL_SELECT_SQL} WHERE transaksi_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([transaksi_id.to_string()])?;
        let mut details = Vec::new();
        while let Some(row) = rows.next()? {
            details.push(parse_detail_row(row)?);
        }
        Ok(details)
    }
}

impl TransaksiRepository for SqliteTransaksiRepository<'_> {
    fn insert(&self, transaksi: &Transaksi) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO transaksi (id, pelanggan_id, tanggal, total, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4,
                     (strftime('%s', 'now') * 1000),
                     (strftime('%s', 'now') * 1000));",
            params![
                transaksi.id.to_string(),
                transaksi.pelanggan_id.map(|id| id.to_string()),
                transaksi.tanggal,
                transaksi.total,
            ],
        )?;

        for detail in &transaksi.detail {
            insert_detail(&tx, detail)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Transaksi>> {
        let (sql, bind_values) = paginate(
            &format!("{TRANSAKSI_SELECT_SQL} ORDER BY tanggal DESC, id ASC"),
            limit,
            offset,
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut headers = Vec::new();
        while let Some(row) = rows.next()? {
            headers.push(parse_transaksi_row(row)?);
        }
        drop(rows);
        drop(stmt);

        for header in &mut headers {
            header.detail = self.load_details(header.id)?;
        }
        Ok(headers)
    }

    fn get(&self, id: Uuid) -> RepoResult<Option<Transaksi>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRANSAKSI_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        let header = match rows.next()? {
            Some(row) => parse_transaksi_row(row)?,
            None => return Ok(None),
        };
        drop(rows);
        drop(stmt);

        let mut transaksi = header;
        transaksi.detail = self.load_details(transaksi.id)?;
        Ok(Some(transaksi))
    }

    fn update(&self, transaksi: &Transaksi) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let changed = tx.execute(
            "UPDATE transaksi
             SET
                pelanggan_id = ?1,
                tanggal = ?2,
                total = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                transaksi.pelanggan_id.map(|id| id.to_string()),
                transaksi.tanggal,
                transaksi.total,
                transaksi.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "transaksi",
                id: transaksi.id,
            });
        }

        // Details are replaced wholesale; partial edits are a service concern.
        tx.execute(
            "DELETE FROM transaksi_detail WHERE transaksi_id = ?1;",
            [transaksi.id.to_string()],
        )?;
        for detail in &transaksi.detail {
            insert_detail(&tx, detail)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM transaksi_detail WHERE transaksi_id = ?1;",
            [id.to_string()],
        )?;
        let changed = tx.execute("DELETE FROM transaksi WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "transaksi",
                id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}

fn insert_detail(conn: &Connection, detail: &TransaksiDetail) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO transaksi_detail (id, transaksi_id, produk_id, jumlah, subtotal)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            detail.id.to_string(),
            detail.transaksi_id.to_string(),
            detail.produk_id.to_string(),
            detail.jumlah,
            detail.subtotal,
        ],
    )?;
    Ok(())
}

fn parse_transaksi_row(row: &Row<'_>) -> RepoResult<Transaksi> {
    let id_text: String = row.get("id")?;
    let pelanggan_id = match row.get::<_, Option<String>>("pelanggan_id")? {
        Some(value) => Some(parse_uuid_column(&value, "transaksi", "pelanggan_id")?),
        None => None,
    };

    Ok(Transaksi {
        id: parse_uuid_column(&id_text, "transaksi", "id")?,
        pelanggan_id,
        tanggal: row.get("tanggal")?,
        total: row.get("total")?,
        detail: Vec::new(),
    })
}

fn parse_detail_row(row: &Row<'_>) -> RepoResult<TransaksiDetail> {
    let id_text: String = row.get("id")?;
    let transaksi_id_text: String = row.get("transaksi_id")?;
    let produk_id_text: String = row.get("produk_id")?;

    Ok(TransaksiDetail {
        id: parse_uuid_column(&id_text, "transaksi_detail", "id")?,
        transaksi_id: parse_uuid_column(&transaksi_id_text, "transaksi_detail", "transaksi_id")?,
        produk_id: parse_uuid_column(&produk_id_text, "transaksi_detail", "produk_id")?,
        jumlah: row.get("jumlah")?,
        subtotal: row.get("subtotal")?,
    })
}
