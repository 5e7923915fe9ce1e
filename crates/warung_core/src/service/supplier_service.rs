//! Supplier use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for supplier flows.
//! - Delegate persistence to a repository implementation.
//!
//! # Invariants
//! - An absent entity fails with `NilEntity` before any repository call.
//! - An unsaved entity (nil ID) receives a fresh v4 UUID before delegation.

use crate::model::supplier::Supplier;
use crate::repo::supplier_repo::SupplierRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Use-case service wrapper for supplier CRUD operations.
pub struct SupplierService<R: SupplierRepository> {
    repo: R,
}

impl<R: SupplierRepository> SupplierService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new supplier, assigning identity when unset.
    ///
    /// Returns the stored entity so callers observe the assigned ID.
    pub fn create(&self, supplier: Option<Supplier>) -> ServiceResult<Supplier> {
        let mut supplier = supplier.ok_or(ServiceError::NilEntity("supplier"))?;
        if !supplier.has_id() {
            supplier.id = Uuid::new_v4();
        }

        self.repo
            .insert(&supplier)
            .map_err(|source| ServiceError::repo("SupplierService::create", source))?;
        Ok(supplier)
    }

    /// Lists suppliers with pagination.
    pub fn get_list(&self, limit: Option<u32>, offset: u32) -> ServiceResult<Vec<Supplier>> {
        self.repo
            .list(limit, offset)
            .map_err(|source| ServiceError::repo("SupplierService::get_list", source))
    }

    /// Gets one supplier by ID.
    pub fn get_detail(&self, id: Uuid) -> ServiceResult<Option<Supplier>> {
        self.repo
            .get(id)
            .map_err(|source| ServiceError::repo("SupplierService::get_detail", source))
    }

    /// Updates an existing supplier, assigning identity when unset.
    pub fn update(&self, supplier: Option<Supplier>) -> ServiceResult<Supplier> {
        let mut supplier = supplier.ok_or(ServiceError::NilEntity("supplier"))?;
        if !supplier.has_id() {
            supplier.id = Uuid::new_v4();
        }

        self.repo
            .update(&supplier)
            .map_err(|source| ServiceError::repo("SupplierService::update", source))?;
        Ok(supplier)
    }

    /// Deletes one supplier by ID.
    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.repo
            .delete(id)
            .map_err(|source| ServiceError::repo("SupplierService::delete", source))
    }
}
