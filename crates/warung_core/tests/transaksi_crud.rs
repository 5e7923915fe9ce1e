use rusqlite::Connection;
use uuid::Uuid;
use warung_core::repo::pembayaran_repo::{PembayaranRepository, SqlitePembayaranRepository};
use warung_core::repo::transaksi_repo::{SqliteTransaksiRepository, TransaksiRepository};
use warung_core::{
    ensure_entity_tables, open_db_in_memory, MetodePembayaran, Pembayaran, RepoError, Transaksi,
    TransaksiDetail, TransaksiService,
};

fn setup_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let report = ensure_entity_tables(&conn);
    assert!(report.is_clean());
    conn
}

fn detail_count(conn: &Connection, transaksi_id: Uuid) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM transaksi_detail WHERE transaksi_id = ?1;",
        [transaksi_id.to_string()],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_persists_header_and_line_items() {
    let conn = setup_db();
    let service = TransaksiService::new(SqliteTransaksiRepository::new(&conn));

    let mut transaksi = Transaksi::new(None, 1_700_000_000_000, 20_000);
    transaksi
        .detail
        .push(TransaksiDetail::new(Uuid::new_v4(), 2, 5_000));
    transaksi
        .detail
        .push(TransaksiDetail::new(Uuid::new_v4(), 3, 15_000));

    let stored = service.create(Some(transaksi)).unwrap();
    assert!(stored.has_id());
    assert_eq!(detail_count(&conn, stored.id), 2);

    let loaded = service.get_detail(stored.id).unwrap().unwrap();
    assert_eq!(loaded.total, 20_000);
    assert_eq!(loaded.detail.len(), 2);
    assert!(loaded.detail.iter().all(|d| d.transaksi_id == stored.id));
}

#[test]
fn update_replaces_line_items() {
    let conn = setup_db();
    let service = TransaksiService::new(SqliteTransaksiRepository::new(&conn));

    let mut transaksi = Transaksi::new(None, 1_700_000_000_000, 5_000);
    transaksi
        .detail
        .push(TransaksiDetail::new(Uuid::new_v4(), 1, 5_000));
    let mut stored = service.create(Some(transaksi)).unwrap();

    stored.detail = vec![
        TransaksiDetail::new(Uuid::new_v4(), 2, 6_000),
        TransaksiDetail::new(Uuid::new_v4(), 1, 4_000),
    ];
    stored.total = 10_000;
    let updated = service.update(Some(stored)).unwrap();

    let loaded = service.get_detail(updated.id).unwrap().unwrap();
    assert_eq!(loaded.total, 10_000);
    assert_eq!(loaded.detail.len(), 2);
    assert_eq!(detail_count(&conn, updated.id), 2);
}

#[test]
fn delete_removes_header_and_line_items() {
    let conn = setup_db();
    let repo = SqliteTransaksiRepository::new(&conn);
    let service = TransaksiService::new(SqliteTransaksiRepository::new(&conn));

    let mut transaksi = Transaksi::new(None, 1_700_000_000_000, 5_000);
    transaksi
        .detail
        .push(TransaksiDetail::new(Uuid::new_v4(), 1, 5_000));
    let stored = service.create(Some(transaksi)).unwrap();

    service.delete(stored.id).unwrap();

    assert!(repo.get(stored.id).unwrap().is_none());
    assert_eq!(detail_count(&conn, stored.id), 0);
}

#[test]
fn list_returns_headers_with_their_line_items() {
    let conn = setup_db();
    let service = TransaksiService::new(SqliteTransaksiRepository::new(&conn));

    let mut older = Transaksi::new(None, 1_000, 1_000);
    older.detail.push(TransaksiDetail::new(Uuid::new_v4(), 1, 1_000));
    service.create(Some(older)).unwrap();

    let newer = Transaksi::new(Some(Uuid::new_v4()), 2_000, 2_000);
    service.create(Some(newer)).unwrap();

    let listed = service.get_list(None, 0).unwrap();
    assert_eq!(listed.len(), 2);
    // Newest first.
    assert_eq!(listed[0].tanggal, 2_000);
    assert!(listed[0].detail.is_empty());
    assert_eq!(listed[1].detail.len(), 1);
}

#[test]
fn pembayaran_roundtrip_preserves_method() {
    let conn = setup_db();
    let repo = SqlitePembayaranRepository::new(&conn);

    let mut pembayaran = Pembayaran::new(
        Uuid::new_v4(),
        MetodePembayaran::Qris,
        20_000,
        1_700_000_000_000,
    );
    pembayaran.id = Uuid::new_v4();
    repo.insert(&pembayaran).unwrap();

    let loaded = repo.get(pembayaran.id).unwrap().unwrap();
    assert_eq!(loaded, pembayaran);
    assert_eq!(loaded.metode, MetodePembayaran::Qris);
}

#[test]
fn pembayaran_with_unknown_method_code_is_rejected_on_read() {
    let conn = setup_db();
    let repo = SqlitePembayaranRepository::new(&conn);

    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO pembayaran (id, transaksi_id, metode, jumlah, tanggal)
         VALUES (?1, ?2, 'cek', 100, 0);",
        [id.to_string(), Uuid::new_v4().to_string()],
    )
    .unwrap();

    let err = repo.get(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
