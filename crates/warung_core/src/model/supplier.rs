//! Supplier domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One goods supplier.
///
/// `id` defaults to the nil UUID for records built from external payloads;
/// the service layer assigns a fresh identity before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub id: Uuid,
    pub nama: String,
    pub alamat: String,
    pub telepon: String,
}

impl Supplier {
    /// Creates an unsaved supplier with an unassigned (nil) ID.
    pub fn new(
        nama: impl Into<String>,
        alamat: impl Into<String>,
        telepon: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            nama: nama.into(),
            alamat: alamat.into(),
            telepon: telepon.into(),
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }
}
