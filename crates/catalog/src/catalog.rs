//! Validated, read-only catalog of suppliers, products and substitutions.

use crate::config::{
    find_catalog_file, CatalogFile, CatalogSource, LocatorSettings, SupplierRecord, BUNDLED_CATALOG,
};
use crate::error::{CatalogError, Result};
use crate::substitution::Substitution;
use greenbuild_geo::{find_nearest_among, Coordinate, NearestMatch, Supplier, SupplierId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

/// A product listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Display price, e.g. `R$ 1,87`
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    /// CO₂ label, e.g. `-13% CO₂`
    #[serde(default)]
    pub co2: String,
    /// Suppliers carrying this product; empty means every supplier
    #[serde(default)]
    pub supplier_ids: Vec<SupplierId>,
}

impl Product {
    /// Numeric price parsed from the display label, see [`parse_price`].
    pub fn price_value(&self) -> Option<f64> {
        parse_price(&self.price)
    }
}

/// Parse a Brazilian price label such as `R$ 1,87` or `R$ 1.234,50`.
///
/// `.` is the thousands separator and `,` the decimal separator. Returns
/// `None` for labels that carry no number.
pub fn parse_price(label: &str) -> Option<f64> {
    let digits: String = label
        .trim()
        .trim_start_matches("R$")
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    digits.parse::<f64>().ok().filter(|price| price.is_finite())
}

/// Ordering of a product listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    /// Catalog order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    /// Distance to the nearest supplier carrying the product
    Distance,
}

/// In-memory catalog. Loaded once, never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    suppliers: Vec<Supplier>,
    products: Vec<Product>,
    substitutions: Vec<Substitution>,
    settings: LocatorSettings,
    source: CatalogSource,
}

impl Catalog {
    /// Load a catalog from `path`, a discovered catalog file, or the bundled default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(find_catalog_file) {
            Some(path) => Self::from_path(&path),
            None => Self::bundled(),
        }
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_CATALOG, CatalogSource::Bundled)
    }

    /// Load and validate a TOML catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, CatalogSource::File(path.to_path_buf()))
    }

    /// Parse and validate a TOML catalog held in memory.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, CatalogSource::Inline)
    }

    fn parse(content: &str, source: CatalogSource) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::Parse {
            origin: source.to_string(),
            source: e,
        })?;

        Self::from_file(file, source)
    }

    /// Validate a parsed catalog file.
    pub fn from_file(file: CatalogFile, source: CatalogSource) -> Result<Self> {
        let suppliers = validate_suppliers(file.suppliers)?;
        let products = validate_products(file.products, &suppliers)?;
        let substitutions = file
            .substitutions
            .into_iter()
            .map(Substitution::normalized)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            source = %source,
            suppliers = suppliers.len(),
            products = products.len(),
            substitutions = substitutions.len(),
            "Catalog loaded"
        );

        Ok(Self {
            suppliers,
            products,
            substitutions,
            settings: file.locator,
            source,
        })
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    pub fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Look up a supplier by id
    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// Look up a product by id
    pub fn product(&self, id: u32) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::UnknownProduct(id))
    }

    /// Suppliers carrying a product, in catalog order.
    ///
    /// A product without a supplier list is offered by every supplier.
    pub fn candidates_for(&self, product_id: u32) -> Result<Vec<&Supplier>> {
        let product = self.product(product_id)?;

        if product.supplier_ids.is_empty() {
            return Ok(self.suppliers.iter().collect());
        }

        Ok(self
            .suppliers
            .iter()
            .filter(|s| product.supplier_ids.contains(&s.id))
            .collect())
    }

    /// Nearest supplier of a product to `reference`.
    pub fn nearest_for_product(
        &self,
        reference: &Coordinate,
        product_id: u32,
    ) -> Result<Option<NearestMatch<'_>>> {
        let product = self.product(product_id)?;
        Ok(find_nearest_among(reference, &self.suppliers, &product.supplier_ids))
    }

    /// Supplier directory filter.
    ///
    /// `term` matches the supplier name case-insensitively; `city` and
    /// `category` must match exactly when given. Results keep catalog order.
    pub fn search_suppliers(
        &self,
        term: &str,
        city: Option<&str>,
        category: Option<&str>,
    ) -> Vec<&Supplier> {
        let term = term.to_lowercase();

        self.suppliers
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&term))
            .filter(|s| city.map_or(true, |c| s.city == c))
            .filter(|s| category.map_or(true, |c| s.category == c))
            .collect()
    }

    /// Product listing filter.
    ///
    /// `term` matches the product name case-insensitively and `category` must
    /// match exactly. With `max_price`, products whose price label cannot be
    /// parsed are left out. Results keep catalog order.
    pub fn search_products(
        &self,
        term: &str,
        category: Option<&str>,
        max_price: Option<f64>,
    ) -> Vec<&Product> {
        let term = term.to_lowercase();

        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| match max_price {
                Some(max) => p.price_value().is_some_and(|price| price <= max),
                None => true,
            })
            .collect()
    }

    /// Sort a product listing in place.
    ///
    /// The sort is stable. Products without a parsable price, or without a
    /// reachable supplier when sorting by distance, go last. `Distance` without
    /// a `reference` keeps the current order.
    pub fn sort_products(&self, products: &mut [&Product], order: ProductSort, reference: Option<&Coordinate>) {
        match order {
            ProductSort::Relevance => {}
            ProductSort::PriceAsc => {
                products.sort_by(|a, b| cmp_missing_last(a.price_value(), b.price_value(), false))
            }
            ProductSort::PriceDesc => {
                products.sort_by(|a, b| cmp_missing_last(a.price_value(), b.price_value(), true))
            }
            ProductSort::Distance => {
                let Some(reference) = reference else {
                    tracing::debug!("Distance sort requested without a reference point");
                    return;
                };
                let distance = |p: &Product| {
                    self.nearest_for_product(reference, p.id)
                        .ok()
                        .flatten()
                        .map(|m| m.distance_km)
                };
                products.sort_by_cached_key(|p| OrderedKm(distance(p)));
            }
        }
    }

    /// Distinct city labels in first-seen order
    pub fn cities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.suppliers
            .iter()
            .map(|s| s.city.as_str())
            .filter(|city| seen.insert(*city))
            .collect()
    }
}

/// `None` (and NaN) after every number; `descending` flips only the numbers.
fn cmp_missing_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a.filter(|v| !v.is_nan()), b.filter(|v| !v.is_nan())) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort key for optional distances, missing last
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedKm(Option<f64>);

impl Eq for OrderedKm {}

impl PartialOrd for OrderedKm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedKm {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_missing_last(self.0, other.0, false)
    }
}

fn validate_suppliers(records: Vec<SupplierRecord>) -> Result<Vec<Supplier>> {
    let mut seen = HashSet::new();

    records
        .into_iter()
        .map(|record| {
            let id = SupplierId(record.id);
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateSupplier(id));
            }

            let location = Coordinate::try_new(record.lat, record.lon).map_err(|e| {
                CatalogError::InvalidSupplierLocation {
                    id,
                    reason: e.to_string(),
                }
            })?;

            Ok(Supplier::new(id, record.name, record.city, record.product, location)
                .with_category(record.category))
        })
        .collect()
}

fn validate_products(products: Vec<Product>, suppliers: &[Supplier]) -> Result<Vec<Product>> {
    let mut seen = HashSet::new();

    for product in &products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        for id in &product.supplier_ids {
            if !suppliers.iter().any(|s| s.id == *id) {
                tracing::warn!(
                    product = product.id,
                    supplier = %id,
                    "Product references an unknown supplier"
                );
            }
        }
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogErrorCode;

    const PALMAS: Coordinate = Coordinate::new(-10.1844, -48.3336);
    const ARAGUAINA: Coordinate = Coordinate::new(-7.19238, -48.2044);

    fn ids(suppliers: &[&Supplier]) -> Vec<u32> {
        suppliers.iter().map(|s| s.id.0).collect()
    }

    #[test]
    fn test_bundled_catalog() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.suppliers().len(), 8);
        assert_eq!(catalog.source(), &CatalogSource::Bundled);
        assert_eq!(catalog.settings().max_radius_km, 50.0);
        assert_eq!(catalog.supplier(SupplierId(16)).unwrap().city, "Palmas-TO");
    }

    #[test]
    fn test_candidates_for_product() {
        let catalog = Catalog::bundled().unwrap();
        let candidates = catalog.candidates_for(3).unwrap();
        assert_eq!(ids(&candidates), vec![2, 6]);
    }

    #[test]
    fn test_candidates_for_product_without_suppliers() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[suppliers]]
            id = 1
            name = "A"
            city = "Palmas-TO"
            lat = -10.1844
            lon = -48.3336

            [[suppliers]]
            id = 2
            name = "B"
            city = "Araguaína-TO"
            lat = -7.19238
            lon = -48.2044

            [[products]]
            id = 7
            name = "Bloco"
            "#,
        )
        .unwrap();

        assert_eq!(ids(&catalog.candidates_for(7).unwrap()), vec![1, 2]);
        let nearest = catalog.nearest_for_product(&ARAGUAINA, 7).unwrap().unwrap();
        assert_eq!(nearest.supplier.id, SupplierId(2));
    }

    #[test]
    fn test_nearest_for_product_respects_supplier_list() {
        let catalog = Catalog::bundled().unwrap();

        // Telha is only carried by suppliers 2 (Araguaína) and 6 (Paraíso)
        let nearest = catalog.nearest_for_product(&PALMAS, 3).unwrap().unwrap();
        assert_eq!(nearest.supplier.id, SupplierId(6));

        // Painel is carried by 5 and 16, both in Palmas; 5 comes first
        let nearest = catalog.nearest_for_product(&PALMAS, 4).unwrap().unwrap();
        assert_eq!(nearest.supplier.id, SupplierId(5));
        assert_eq!(nearest.distance_label(), "~0 km");
    }

    #[test]
    fn test_unknown_product() {
        let catalog = Catalog::bundled().unwrap();
        let err = catalog.nearest_for_product(&PALMAS, 99).unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::UnknownProduct);
    }

    #[test]
    fn test_duplicate_supplier_rejected() {
        let err = Catalog::from_toml_str(
            r#"
            [[suppliers]]
            id = 1
            name = "A"
            city = "X"
            lat = 0.0
            lon = 0.0

            [[suppliers]]
            id = 1
            name = "B"
            city = "Y"
            lat = 1.0
            lon = 1.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::DuplicateSupplier);
    }

    #[test]
    fn test_invalid_location_rejected() {
        let err = Catalog::from_toml_str(
            r#"
            [[suppliers]]
            id = 9
            name = "Off the map"
            city = "X"
            lat = -100.0
            lon = 0.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::InvalidSupplierLocation);
        assert!(err.to_string().contains("#9"));
    }

    #[test]
    fn test_nan_location_rejected() {
        let err = Catalog::from_toml_str(
            r#"
            [[suppliers]]
            id = 9
            name = "Nowhere"
            city = "X"
            lat = nan
            lon = 0.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::InvalidSupplierLocation);
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let err = Catalog::from_toml_str(
            r#"
            [[products]]
            id = 1
            name = "A"

            [[products]]
            id = 1
            name = "B"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::DuplicateProduct);
    }

    #[test]
    fn test_parse_error() {
        let err = Catalog::from_toml_str("[[suppliers]]\nid = \"one\"").unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::Parse);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greenbuild.toml");
        std::fs::write(
            &path,
            "[locator]\nmax_radius_km = 25.0\n\n[[suppliers]]\nid = 1\nname = \"A\"\ncity = \"Palmas-TO\"\nlat = -10.0\nlon = -48.0\n",
        )
        .unwrap();

        let catalog = Catalog::load(Some(path.as_path())).unwrap();
        assert_eq!(catalog.settings().max_radius_km, 25.0);
        assert_eq!(catalog.source(), &CatalogSource::File(path));
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.code(), CatalogErrorCode::Io);
    }

    #[test]
    fn test_search_suppliers() {
        let catalog = Catalog::bundled().unwrap();

        assert_eq!(ids(&catalog.search_suppliers("tijolos", None, None)), vec![3, 4, 5]);
        assert_eq!(ids(&catalog.search_suppliers("TIJOLOS", Some("Palmas-TO"), None)), vec![3, 5]);
        assert_eq!(catalog.search_suppliers("", None, None).len(), 8);
        assert!(catalog.search_suppliers("xyz", None, None).is_empty());
    }

    #[test]
    fn test_search_suppliers_by_category() {
        let catalog = Catalog::bundled().unwrap();

        assert_eq!(
            ids(&catalog.search_suppliers("", None, Some("Estruturas e Pisos"))),
            vec![2, 6]
        );
        assert_eq!(
            ids(&catalog.search_suppliers("", Some("Palmas-TO"), Some("Materiais Reciclados"))),
            vec![3, 5, 16]
        );
        assert!(catalog.search_suppliers("", None, Some("materiais reciclados")).is_empty());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("R$ 1,87"), Some(1.87));
        assert_eq!(parse_price("R$ 90,00"), Some(90.0));
        assert_eq!(parse_price("R$1.234,50"), Some(1234.5));
        assert_eq!(parse_price("  48,7 "), Some(48.7));
        assert_eq!(parse_price("Sob consulta"), None);
        assert_eq!(parse_price(""), None);
    }

    fn product_ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_search_products() {
        let catalog = Catalog::bundled().unwrap();

        assert_eq!(product_ids(&catalog.search_products("", None, None)), vec![1, 2, 3, 4]);
        assert_eq!(product_ids(&catalog.search_products("TELHA", None, None)), vec![3]);
        assert_eq!(product_ids(&catalog.search_products("", Some("Agregados"), None)), vec![2]);
        // Prices: 1,87 / 90,00 / 53,00 / 48,70
        assert_eq!(product_ids(&catalog.search_products("", None, Some(50.0))), vec![1, 4]);
        assert_eq!(product_ids(&catalog.search_products("", None, Some(53.0))), vec![1, 3, 4]);
        assert!(catalog.search_products("", None, Some(1.0)).is_empty());
    }

    #[test]
    fn test_search_products_skips_unpriced_when_capped() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[products]]
            id = 1
            name = "Bloco"
            price = "Sob consulta"

            [[products]]
            id = 2
            name = "Telha"
            price = "R$ 10,00"
            "#,
        )
        .unwrap();

        assert_eq!(product_ids(&catalog.search_products("", None, None)), vec![1, 2]);
        assert_eq!(product_ids(&catalog.search_products("", None, Some(100.0))), vec![2]);
    }

    #[test]
    fn test_sort_products_by_price() {
        let catalog = Catalog::bundled().unwrap();
        let mut products = catalog.search_products("", None, None);

        catalog.sort_products(&mut products, ProductSort::PriceAsc, None);
        assert_eq!(product_ids(&products), vec![1, 4, 3, 2]);

        catalog.sort_products(&mut products, ProductSort::PriceDesc, None);
        assert_eq!(product_ids(&products), vec![2, 3, 4, 1]);

        catalog.sort_products(&mut products, ProductSort::Relevance, None);
        assert_eq!(product_ids(&products), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_sort_products_unpriced_last() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[products]]
            id = 1
            name = "Bloco"

            [[products]]
            id = 2
            name = "Telha"
            price = "R$ 10,00"

            [[products]]
            id = 3
            name = "Areia"
            price = "R$ 5,00"
            "#,
        )
        .unwrap();
        let mut products = catalog.search_products("", None, None);

        catalog.sort_products(&mut products, ProductSort::PriceAsc, None);
        assert_eq!(product_ids(&products), vec![3, 2, 1]);

        catalog.sort_products(&mut products, ProductSort::PriceDesc, None);
        assert_eq!(product_ids(&products), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_products_by_distance() {
        let catalog = Catalog::bundled().unwrap();
        let mut products = catalog.search_products("", None, None);

        // From Araguaína: Tijolo (1), Seixo (2), Telha (3) and Painel (4) all have a local
        // supplier, so the stable sort keeps catalog order
        catalog.sort_products(&mut products, ProductSort::Distance, Some(&ARAGUAINA));
        assert_eq!(product_ids(&products), vec![1, 2, 3, 4]);

        // From Palmas: Tijolo and Painel are at 0 km, Seixo and Telha at Paraíso (~60 km)
        catalog.sort_products(&mut products, ProductSort::Distance, Some(&PALMAS));
        assert_eq!(product_ids(&products), vec![1, 4, 2, 3]);

        // No reference point: order unchanged
        catalog.sort_products(&mut products, ProductSort::Distance, None);
        assert_eq!(product_ids(&products), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_supplier_category_loaded() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.supplier(SupplierId(4)).unwrap().category, "Materiais Naturais");
    }

    #[test]
    fn test_cities() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(
            catalog.cities(),
            vec!["Araguaína-TO", "Palmas-TO", "Porto Nacional-TO", "Paraíso do Tocantins-TO"]
        );
    }
}
