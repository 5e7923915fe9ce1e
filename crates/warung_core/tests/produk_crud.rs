use rusqlite::Connection;
use uuid::Uuid;
use warung_core::repo::produk_repo::{ProdukRepository, SqliteProdukRepository};
use warung_core::{
    ensure_entity_tables, open_db_in_memory, Produk, ProdukService, RepoError,
    SqliteSupplierRepository, Supplier, SupplierRepository,
};

fn setup_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let report = ensure_entity_tables(&conn);
    assert!(report.is_clean());
    conn
}

#[test]
fn insert_and_get_roundtrip_with_supplier_reference() {
    let conn = setup_db();
    let supplier_repo = SqliteSupplierRepository::new(&conn);
    let repo = SqliteProdukRepository::new(&conn);

    let mut supplier = Supplier::new("Grosir Jaya", "Jl. Melati 1", "0811");
    supplier.id = Uuid::new_v4();
    supplier_repo.insert(&supplier).unwrap();

    let mut produk = Produk::new("Kopi Sachet", 2_500, 120);
    produk.id = Uuid::new_v4();
    produk.supplier_id = Some(supplier.id);
    repo.insert(&produk).unwrap();

    let loaded = repo.get(produk.id).unwrap().unwrap();
    assert_eq!(loaded, produk);
    assert_eq!(loaded.supplier_id, Some(supplier.id));
}

#[test]
fn insert_and_get_roundtrip_without_supplier() {
    let conn = setup_db();
    let repo = SqliteProdukRepository::new(&conn);

    let mut produk = Produk::new("Gula 1kg", 15_000, 40);
    produk.id = Uuid::new_v4();
    repo.insert(&produk).unwrap();

    let loaded = repo.get(produk.id).unwrap().unwrap();
    assert_eq!(loaded.supplier_id, None);
}

#[test]
fn update_adjusts_price_and_stock() {
    let conn = setup_db();
    let repo = SqliteProdukRepository::new(&conn);

    let mut produk = Produk::new("Kopi Sachet", 2_500, 120);
    produk.id = Uuid::new_v4();
    repo.insert(&produk).unwrap();

    produk.harga = 2_750;
    produk.stok = 96;
    repo.update(&produk).unwrap();

    let loaded = repo.get(produk.id).unwrap().unwrap();
    assert_eq!(loaded.harga, 2_750);
    assert_eq!(loaded.stok, 96);
}

#[test]
fn delete_missing_product_reports_not_found() {
    let conn = setup_db();
    let repo = SqliteProdukRepository::new(&conn);

    let err = repo.delete(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "produk", .. }));
}

#[test]
fn service_assigns_identity_on_create() {
    let conn = setup_db();
    let service = ProdukService::new(SqliteProdukRepository::new(&conn));

    let stored = service
        .create(Some(Produk::new("Kopi Sachet", 2_500, 120)))
        .unwrap();
    assert!(stored.has_id());

    let listed = service.get_list(None, 0).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, stored.id);
}
