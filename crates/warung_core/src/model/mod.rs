//! Domain models for the warung point-of-sale entities.
//!
//! # Responsibility
//! - Define the plain records persisted by the repository layer.
//!
//! # Invariants
//! - Every entity is identified by a stable `Uuid`; the nil UUID marks a
//!   record whose identity has not been assigned yet.
//! - Models carry no storage details; timestamps are maintained SQL-side.

pub mod pelanggan;
pub mod pembayaran;
pub mod produk;
pub mod supplier;
pub mod transaksi;

pub use pelanggan::Pelanggan;
pub use pembayaran::{MetodePembayaran, Pembayaran};
pub use produk::Produk;
pub use supplier::Supplier;
pub use transaksi::{Transaksi, TransaksiDetail};
