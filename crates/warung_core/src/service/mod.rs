//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Orchestrate repository calls into stable CRUD entry points.
//! - Assign entity identity (v4 UUID) when callers submit unsaved records.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - No business validation beyond absent-entity checks and ID generation.
//! - Repository errors carry the failing operation name as data, not as a
//!   hardcoded message string.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod pelanggan_service;
pub mod pembayaran_service;
pub mod produk_service;
pub mod supplier_service;
pub mod transaksi_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-layer error taxonomy.
#[derive(Debug)]
pub enum ServiceError {
    /// `create`/`update` was given no entity; recoverable by the caller and
    /// never reaches the repository.
    NilEntity(&'static str),
    /// A repository call failed inside the named operation.
    Repo {
        op: &'static str,
        source: RepoError,
    },
}

impl ServiceError {
    pub(crate) fn repo(op: &'static str, source: RepoError) -> Self {
        Self::Repo { op, source }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilEntity(entity) => write!(f, "{entity} is nil"),
            Self::Repo { op, source } => write!(f, "[{op}] {source}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NilEntity(_) => None,
            Self::Repo { source, .. } => Some(source),
        }
    }
}
