//! Catalog file schema and discovery.
//!
//! A catalog is a TOML document with `[locator]`, `[[suppliers]]`,
//! `[[products]]` and `[[substitutions]]` sections. When no file is given or
//! found, the bundled Tocantins catalog is used.

use crate::catalog::Product;
use crate::substitution::Substitution;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Catalog compiled into the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../data/catalog.toml");

/// File names searched, in order, when no explicit catalog path is given.
pub const CATALOG_FILE_CANDIDATES: &[&str] = &[
    "greenbuild.toml",
    ".greenbuild.toml",
    ".config/greenbuild.toml",
];

/// Root catalog schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub locator: LocatorSettings,

    #[serde(default)]
    pub suppliers: Vec<SupplierRecord>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub substitutions: Vec<Substitution>,
}

/// Locator defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatorSettings {
    /// Default search radius in kilometers for radius-limited queries
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            max_radius_km: default_max_radius_km(),
        }
    }
}

fn default_max_radius_km() -> f64 {
    50.0
}

/// Supplier entry as written in the catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: u32,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub category: String,
    pub lat: f64,
    pub lon: f64,
}

/// Where a catalog was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
    Inline,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Bundled => write!(f, "bundled catalog"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Inline => write!(f, "inline catalog"),
        }
    }
}

/// Find a catalog file in the current directory
pub fn find_catalog_file() -> Option<PathBuf> {
    find_catalog_file_in(Path::new("."))
}

/// Find a catalog file under `dir` using [`CATALOG_FILE_CANDIDATES`]
pub fn find_catalog_file_in(dir: &Path) -> Option<PathBuf> {
    CATALOG_FILE_CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_defaults() {
        let file: CatalogFile = toml::from_str("").unwrap();
        assert_eq!(file.locator.max_radius_km, 50.0);
        assert!(file.suppliers.is_empty());
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let file: CatalogFile = toml::from_str(BUNDLED_CATALOG).unwrap();
        assert_eq!(file.suppliers.len(), 8);
        assert_eq!(file.products.len(), 4);
        assert_eq!(file.substitutions.len(), 6);
    }

    #[test]
    fn test_find_catalog_file_order() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_catalog_file_in(dir.path()).is_none());

        std::fs::create_dir_all(dir.path().join(".config")).unwrap();
        std::fs::write(dir.path().join(".config/greenbuild.toml"), "").unwrap();
        assert_eq!(
            find_catalog_file_in(dir.path()),
            Some(dir.path().join(".config/greenbuild.toml"))
        );

        std::fs::write(dir.path().join("greenbuild.toml"), "").unwrap();
        assert_eq!(
            find_catalog_file_in(dir.path()),
            Some(dir.path().join("greenbuild.toml"))
        );
    }
}
