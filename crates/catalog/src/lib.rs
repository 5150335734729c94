//! Supplier, product and material-substitution catalog for GreenBuild.
//!
//! The catalog is the data-provisioning side of the storefront: it loads the
//! supplier list once, validates it at the boundary, and hands read-only
//! slices to the locator in `greenbuild-geo`.
//!
//! # Example
//!
//! ```
//! use greenbuild_catalog::Catalog;
//! use greenbuild_geo::{Coordinate, SupplierId};
//!
//! let catalog = Catalog::bundled().unwrap();
//! let palmas = Coordinate::new(-10.1844, -48.3336);
//!
//! // Product 3 (Telha Ecológica Térmica) is carried by suppliers 2 and 6
//! let nearest = catalog.nearest_for_product(&palmas, 3).unwrap().unwrap();
//! assert_eq!(nearest.supplier.id, SupplierId(6));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod substitution;

pub use catalog::{parse_price, Catalog, Product, ProductSort};
pub use config::{CatalogSource, LocatorSettings};
pub use error::{CatalogError, CatalogErrorCode, Result};
pub use substitution::{recommend, MaterialRequest, Recommendation, RecommendationKind, RecommendationSummary};
