//! Error types for catalog loading and lookups.

use greenbuild_geo::SupplierId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid TOML or does not match the schema
    #[error("Failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Two suppliers share an id
    #[error("Duplicate supplier id {0}")]
    DuplicateSupplier(SupplierId),

    /// Two products share an id
    #[error("Duplicate product id {0}")]
    DuplicateProduct(u32),

    /// A supplier's coordinate is out of range or not finite
    #[error("Supplier {id} has an invalid location: {reason}")]
    InvalidSupplierLocation { id: SupplierId, reason: String },

    /// Product lookup failed
    #[error("Unknown product id {0}")]
    UnknownProduct(u32),

    /// Substitution entry is malformed
    #[error("Invalid substitution '{key}': {reason}")]
    InvalidSubstitution { key: String, reason: String },
}

/// Error code for programmatic handling.
/// Range: 20xxx for catalog errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    Io = 20001,
    Parse = 20002,
    DuplicateSupplier = 20003,
    DuplicateProduct = 20004,
    InvalidSupplierLocation = 20005,
    UnknownProduct = 20006,
    InvalidSubstitution = 20007,
}

impl CatalogError {
    /// Returns the error code for this error.
    pub fn code(&self) -> CatalogErrorCode {
        match self {
            CatalogError::Io { .. } => CatalogErrorCode::Io,
            CatalogError::Parse { .. } => CatalogErrorCode::Parse,
            CatalogError::DuplicateSupplier(_) => CatalogErrorCode::DuplicateSupplier,
            CatalogError::DuplicateProduct(_) => CatalogErrorCode::DuplicateProduct,
            CatalogError::InvalidSupplierLocation { .. } => CatalogErrorCode::InvalidSupplierLocation,
            CatalogError::UnknownProduct(_) => CatalogErrorCode::UnknownProduct,
            CatalogError::InvalidSubstitution { .. } => CatalogErrorCode::InvalidSubstitution,
        }
    }

    /// Recovery suggestion shown next to the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            CatalogError::Io { .. } => {
                Some("Check that the catalog file exists and you have read permissions")
            }
            CatalogError::Parse { .. } => {
                Some("Compare the file against the bundled catalog layout ([[suppliers]], [[products]], [[substitutions]])")
            }
            CatalogError::DuplicateSupplier(_) | CatalogError::DuplicateProduct(_) => {
                Some("Give every entry a unique id")
            }
            CatalogError::InvalidSupplierLocation { .. } => {
                Some("Use decimal degrees: latitude in [-90, 90], longitude in [-180, 180]")
            }
            CatalogError::UnknownProduct(_) => Some("Run `gb-locate products` to list known product ids"),
            CatalogError::InvalidSubstitution { .. } => None,
        }
    }
}
