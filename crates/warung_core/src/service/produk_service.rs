//! Product use-case service.

use crate::model::produk::Produk;
use crate::repo::produk_repo::ProdukRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Use-case service wrapper for product CRUD operations.
pub struct ProdukService<R: ProdukRepository> {
    repo: R,
}

impl<R: ProdukRepository> ProdukService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new product, assigning identity when unset.
    pub fn create(&self, produk: Option<Produk>) -> ServiceResult<Produk> {
        let mut produk = produk.ok_or(ServiceError::NilEntity("produk"))?;
        if !produk.has_id() {
            produk.id = Uuid::new_v4();
        }

        self.repo
            .insert(&produk)
            .map_err(|source| ServiceError::repo("ProdukService::create", source))?;
        Ok(produk)
    }

    /// Lists products with pagination.
    pub fn get_list(&self, limit: Option<u32>, offset: u32) -> ServiceResult<Vec<Produk>> {
        self.repo
            .list(limit, offset)
            .map_err(|source| ServiceError::repo("ProdukService::get_list", source))
    }

    /// Gets one product by ID.
    pub fn get_detail(&self, id: Uuid) -> ServiceResult<Option<Produk>> {
        self.repo
            .get(id)
            .map_err(|source| ServiceError::repo("ProdukService::get_detail", source))
    }

    /// Updates an existing product, assigning identity when unset.
    pub fn update(&self, produk: Option<Produk>) -> ServiceResult<Produk> {
        let mut produk = produk.ok_or(ServiceError::NilEntity("produk"))?;
        if !produk.has_id() {
            produk.id = Uuid::new_v4();
        }

        self.repo
            .update(&produk)
            .map_err(|source| ServiceError::repo("ProdukService::update", source))?;
        Ok(produk)
    }

    /// Deletes one product by ID.
    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo
            .delete(id)
            .map_err(|source| ServiceError::repo("ProdukService::delete", source))
    }
}
