//! Payment use-case service.

use crate::model::pembayaran::Pembayaran;
use crate::repo::pembayaran_repo::PembayaranRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Use-case service wrapper for payment CRUD operations.
pub struct PembayaranService<R: PembayaranRepository> {
    repo: R,
}

impl<R: PembayaranRepository> PembayaranService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new payment, assigning identity when unset.
    pub fn create(&self, pembayaran: Option<Pembayaran>) -> ServiceResult<Pembayaran> {
        let mut pembayaran = pembayaran.ok_or(ServiceError::NilEntity("pembayaran"))?;
        if !pembayaran.has_id() {
            pembayaran.id = Uuid::new_v4();
        }

        self.repo
            .insert(&pembayaran)
            .map_err(|source| ServiceError::repo("PembayaranService::create", source))?;
        Ok(pembayaran)
    }

    /// Lists payments with pagination.
    pub fn get_list(&self, limit: Option<u32>, offset: u32) -> ServiceResult<Vec<Pembayaran>> {
        self.repo
            .list(limit, offset)
            .map_err(|source| ServiceError::repo("PembayaranService::get_list", source))
    }

    /// Gets one payment by ID.
    pub fn get_detail(&self, id: Uuid) -> ServiceResult<Option<Pembayaran>> {
        self.repo
            .get(id)
            .map_err(|source| ServiceError::repo("PembayaranService::get_detail", source))
    }

    /// Updates an existing payment, assigning identity when unset.
    pub fn update(&self, pembayaran: Option<Pembayaran>) -> ServiceResult<Pembayaran> {
        let mut pembayaran = pembayaran.ok_or(ServiceError::NilEntity("pembayaran"))?;
        if !pembayaran.has_id() {
            pembayaran.id = Uuid::new_v4();
        }

        self.repo
            .update(&pembayaran)
            .map_err(|source| ServiceError::repo("PembayaranService::update", source))?;
        Ok(pembayaran)
    }

    /// Deletes one payment by ID.
    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo
            .delete(id)
            .map_err(|source| ServiceError::repo("PembayaranService::delete", source))
    }
}
