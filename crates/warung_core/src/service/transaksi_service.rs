//! Sales transaction use-case service.
//!
//! # Invariants
//! - Creating or updating a transaction assigns identity to the header and
//!   to every line item, and points each line item at the header.

use crate::model::transaksi::Transaksi;
use crate::repo::transaksi_repo::TransaksiRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Use-case service wrapper for transaction CRUD operations.
pub struct TransaksiService<R: TransaksiRepository> {
    repo: R,
}

impl<R: TransaksiRepository> TransaksiService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new transaction with its line items.
    pub fn create(&self, transaksi: Option<Transaksi>) -> ServiceResult<Transaksi> {
        let mut transaksi = transaksi.ok_or(ServiceError::NilEntity("transaksi"))?;
        assign_identity(&mut transaksi);

        self.repo
            .insert(&transaksi)
            .map_err(|source| ServiceError::repo("TransaksiService::create", source))?;
        Ok(transaksi)
    }

    /// Lists transactions (with line items) using pagination.
    pub fn get_list(&self, limit: Option<u32>, offset: u32) -> ServiceResult<Vec<Transaksi>> {
        self.repo
            .list(limit, offset)
            .map_err(|source| ServiceError::repo("TransaksiService::get_list", source))
    }

    /// Gets one transaction (with line items) by ID.
    pub fn get_detail(&self, id: Uuid) -> ServiceResult<Option<Transaksi>> {
        self.repo
            .get(id)
            .map_err(|source| ServiceError::repo("TransaksiService::get_detail", source))
    }

    /// Updates an existing transaction, replacing its line items.
    pub fn update(&self, transaksi: Option<Transaksi>) -> ServiceResult<Transaksi> {
        let mut transaksi = transaksi.ok_or(ServiceError::NilEntity("transaksi"))?;
        assign_identity(&mut transaksi);

        self.repo
            .update(&transaksi)
            .map_err(|source| ServiceError::repo("TransaksiService::update", source))?;
        Ok(transaksi)
    }

    /// Deletes one transaction and its line items by ID.
    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo
            .delete(id)
            .map_err(|source| ServiceError::repo("TransaksiService::delete", source))
    }
}

fn assign_identity(transaksi: &mut Transaksi) {
    if !transaksi.has_id() {
        transaksi.id = Uuid::new_v4();
    }
    for detail in &mut transaksi.detail {
        if detail.id.is_nil() {
            detail.id = Uuid::new_v4();
        }
        detail.transaksi_id = transaksi.id;
    }
}
