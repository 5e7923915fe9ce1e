//! Core domain logic for the warung point-of-sale backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::migrate::{
    MigrateError, MigrateResult, MigrationRegistry, MigrationReport, MigrationRunner,
};
pub use db::migrations::baseline_registry;
pub use db::schema::{ensure_entity_tables, SchemaReport, ENTITY_TABLES};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::{
    MetodePembayaran, Pelanggan, Pembayaran, Produk, Supplier, Transaksi, TransaksiDetail,
};
pub use repo::pelanggan_repo::{PelangganRepository, SqlitePelangganRepository};
pub use repo::pembayaran_repo::{PembayaranRepository, SqlitePembayaranRepository};
pub use repo::produk_repo::{ProdukRepository, SqliteProdukRepository};
pub use repo::supplier_repo::{SqliteSupplierRepository, SupplierRepository};
pub use repo::transaksi_repo::{SqliteTransaksiRepository, TransaksiRepository};
pub use repo::{RepoError, RepoResult};
pub use service::pelanggan_service::PelangganService;
pub use service::pembayaran_service::PembayaranService;
pub use service::produk_service::ProdukService;
pub use service::supplier_service::SupplierService;
pub use service::transaksi_service::TransaksiService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
