//! Sales transaction domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One sales transaction header with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaksi {
    #[serde(default)]
    pub id: Uuid,
    /// Optional registered customer; walk-in sales leave this unset.
    pub pelanggan_id: Option<Uuid>,
    /// Transaction time in unix epoch milliseconds.
    pub tanggal: i64,
    /// Total amount in integer rupiah.
    pub total: i64,
    #[serde(default)]
    pub detail: Vec<TransaksiDetail>,
}

/// One line item of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransaksiDetail {
    #[serde(default)]
    pub id: Uuid,
    /// Parent transaction; assigned by the service alongside the header ID.
    #[serde(default)]
    pub transaksi_id: Uuid,
    pub produk_id: Uuid,
    pub jumlah: i64,
    pub subtotal: i64,
}

impl Transaksi {
    /// Creates an unsaved transaction with an unassigned (nil) ID.
    pub fn new(pelanggan_id: Option<Uuid>, tanggal: i64, total: i64) -> Self {
        Self {
            id: Uuid::nil(),
            pelanggan_id,
            tanggal,
            total,
            detail: Vec::new(),
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }
}

impl TransaksiDetail {
    /// Creates an unsaved line item with unassigned IDs.
    pub fn new(produk_id: Uuid, jumlah: i64, subtotal: i64) -> Self {
        Self {
            id: Uuid::nil(),
            transaksi_id: Uuid::nil(),
            produk_id,
            jumlah,
            subtotal,
        }
    }
}
