//! Customer use-case service.

use crate::model::pelanggan::Pelanggan;
use crate::repo::pelanggan_repo::PelangganRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Use-case service wrapper for customer CRUD operations.
pub struct PelangganService<R: PelangganRepository> {
    repo: R,
}

impl<R: PelangganRepository> PelangganService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new customer, assigning identity when unset.
    pub fn create(&self, pelanggan: Option<Pelanggan>) -> ServiceResult<Pelanggan> {
        let mut pelanggan = pelanggan.ok_or(ServiceError::NilEntity("pelanggan"))?;
        if !pelanggan.has_id() {
            pelanggan.id = Uuid::new_v4();
        }

        self.repo
            .insert(&pelanggan)
            .map_err(|source| ServiceError::repo("PelangganService::create", source))?;
        Ok(pelanggan)
    }

    /// Lists customers with pagination.
    pub fn get_list(&self, limit: Option<u32>, offset: u32) -> ServiceResult<Vec<Pelanggan>> {
        self.repo
            .list(limit, offset)
            .map_err(|source| ServiceError::repo("PelangganService::get_list", source))
    }

    /// Gets one customer by ID.
    pub fn get_detail(&self, id: Uuid) -> ServiceResult<Option<Pelanggan>> {
        self.repo
            .get(id)
            .map_err(|source| ServiceError::repo("PelangganService::get_detail", source))
    }

    /// Updates an existing customer, assigning identity when unset.
    pub fn update(&self, pelanggan: Option<Pelanggan>) -> ServiceResult<Pelanggan> {
        let mut pelanggan = pelanggan.ok_or(ServiceError::NilEntity("pelanggan"))?;
        if !pelanggan.has_id() {
            pelanggan.id = Uuid::new_v4();
        }

        self.repo
            .update(&pelanggan)
            .map_err(|source| ServiceError::repo("PelangganService::update", source))?;
        Ok(pelanggan)
    }

    /// Deletes one customer by ID.
    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo
            .delete(id)
            .map_err(|source| ServiceError::repo("PelangganService::delete", source))
    }
}
