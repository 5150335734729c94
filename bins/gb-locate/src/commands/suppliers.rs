//! Suppliers and products commands - catalog listings

use crate::OutputFormat;
use anyhow::{bail, Result};
use greenbuild_catalog::{Catalog, ProductSort};
use greenbuild_cli::output::{format_count, format_km, Status};
use greenbuild_geo::Coordinate;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Run suppliers command
pub fn run(
    catalog: &Catalog,
    search: &str,
    city: Option<&str>,
    category: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let suppliers = catalog.search_suppliers(search, city, category);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&suppliers)?);
        return Ok(());
    }

    Status::header("🏭 Supplier Directory");

    if suppliers.is_empty() {
        Status::warning("No suppliers match the filters");
        println!("  {} {}", "Cities:".dimmed(), catalog.cities().join(", "));
        return Ok(());
    }

    println!(
        "  {:<4} {:<45} {:<25} {:<22} {}",
        "ID".dimmed(),
        "Name".dimmed(),
        "City".dimmed(),
        "Category".dimmed(),
        "Products".dimmed()
    );
    for supplier in &suppliers {
        println!(
            "  {:<4} {:<45} {:<25} {:<22} {}",
            supplier.id.0,
            supplier.name.bold(),
            supplier.city,
            supplier.category,
            supplier.product.dimmed()
        );
    }

    println!();
    println!(
        "  {} from {}",
        format_count(suppliers.len(), "supplier", "suppliers"),
        catalog.source()
    );

    Ok(())
}

/// Filters and order for the products listing
#[derive(Debug, Clone, Copy)]
pub struct ProductQuery<'a> {
    pub reference: Option<Coordinate>,
    pub search: &'a str,
    pub category: Option<&'a str>,
    pub max_price: Option<f64>,
    pub sort: ProductSort,
}

#[derive(Debug, Serialize)]
struct ProductDetail<'a> {
    id: u32,
    name: &'a str,
    price: &'a str,
    price_value: Option<f64>,
    category: &'a str,
    co2: &'a str,
    supplier_count: usize,
    /// Distance to the nearest supplier, when a location is known
    nearest_km: Option<f64>,
}

/// Run products command
pub fn run_products(catalog: &Catalog, query: &ProductQuery<'_>, format: OutputFormat) -> Result<()> {
    if query.sort == ProductSort::Distance && query.reference.is_none() {
        bail!("Sorting by distance needs your location: pass --lat and --lon");
    }

    let mut products = catalog.search_products(query.search, query.category, query.max_price);
    catalog.sort_products(&mut products, query.sort, query.reference.as_ref());

    let details = products
        .into_iter()
        .map(|p| -> Result<ProductDetail> {
            let nearest_km = match &query.reference {
                Some(r) => catalog.nearest_for_product(r, p.id)?.map(|m| m.distance_km),
                None => None,
            };
            Ok(ProductDetail {
                id: p.id,
                name: &p.name,
                price: &p.price,
                price_value: p.price_value(),
                category: &p.category,
                co2: &p.co2,
                supplier_count: catalog.candidates_for(p.id)?.len(),
                nearest_km,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    Status::header("🧱 Products");

    if details.is_empty() {
        Status::warning("No products match the filters");
        return Ok(());
    }

    for p in &details {
        let nearest = p.nearest_km.map_or_else(String::new, format_km);
        println!(
            "  {:<4} {:<30} {:<12} {:<25} {:<12} {:<12} {}",
            p.id,
            p.name.bold(),
            p.price,
            p.category.dimmed(),
            p.co2.green(),
            format_count(p.supplier_count, "supplier", "suppliers").dimmed(),
            nearest.cyan()
        );
    }
    println!();

    Ok(())
}
