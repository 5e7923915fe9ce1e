//! Payment domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment method, stored as the text codes seeded into `payment_methods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetodePembayaran {
    Tunai,
    Transfer,
    Qris,
}

impl MetodePembayaran {
    /// Returns the storage code for this method.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Tunai => "tunai",
            Self::Transfer => "transfer",
            Self::Qris => "qris",
        }
    }

    /// Parses a storage code back into a method.
    pub fn parse_code(value: &str) -> Option<Self> {
        match value {
            "tunai" => Some(Self::Tunai),
            "transfer" => Some(Self::Transfer),
            "qris" => Some(Self::Qris),
            _ => None,
        }
    }
}

/// One payment against a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pembayaran {
    #[serde(default)]
    pub id: Uuid,
    pub transaksi_id: Uuid,
    pub metode: MetodePembayaran,
    /// Amount in integer rupiah.
    pub jumlah: i64,
    /// Payment time in unix epoch milliseconds.
    pub tanggal: i64,
}

impl Pembayaran {
    /// Creates an unsaved payment with an unassigned (nil) ID.
    pub fn new(transaksi_id: Uuid, metode: MetodePembayaran, jumlah: i64, tanggal: i64) -> Self {
        Self {
            id: Uuid::nil(),
            transaksi_id,
            metode,
            jumlah,
            tanggal,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }
}
