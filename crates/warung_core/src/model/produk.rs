//! Product domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One sellable product. Prices are integer rupiah, no fractional units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Produk {
    #[serde(default)]
    pub id: Uuid,
    pub nama: String,
    pub harga: i64,
    pub stok: i64,
    /// Optional source supplier reference.
    pub supplier_id: Option<Uuid>,
}

impl Produk {
    /// Creates an unsaved product with an unassigned (nil) ID.
    pub fn new(nama: impl Into<String>, harga: i64, stok: i64) -> Self {
        Self {
            id: Uuid::nil(),
            nama: nama.into(),
            harga,
            stok,
            supplier_id: None,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }
}
