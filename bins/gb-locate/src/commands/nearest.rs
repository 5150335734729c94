//! Nearest command - closest supplier per product

use crate::OutputFormat;
use anyhow::Result;
use greenbuild_catalog::{Catalog, Product};
use greenbuild_cli::output::Status;
use greenbuild_geo::{find_nearest, find_nearest_among, Coordinate, NearestMatch, Supplier, SupplierId};
use greenbuild_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;

const LOCATION_PROMPT: &str = "Enable your location (--lat/--lon) to see nearby suppliers";

/// JSON output for the nearest command
#[derive(Debug, Serialize)]
struct JsonNearestOutput<'a> {
    location: Option<Coordinate>,
    max_radius_km: Option<f64>,
    results: Vec<NearestRow<'a>>,
}

#[derive(Debug, Serialize)]
struct NearestRow<'a> {
    product: Option<&'a Product>,
    nearest: Option<MatchDetail<'a>>,
}

#[derive(Debug, Serialize)]
struct MatchDetail<'a> {
    supplier: &'a Supplier,
    distance_km: f64,
    label: String,
}

impl<'a> From<NearestMatch<'a>> for MatchDetail<'a> {
    fn from(m: NearestMatch<'a>) -> Self {
        Self {
            supplier: m.supplier,
            distance_km: m.distance_km,
            label: m.distance_label(),
        }
    }
}

/// Run nearest command
///
/// Without `--product` every product gets a row. When the catalog has no
/// products, or only `--supplier` ids are given, a single supplier-only lookup
/// is made instead.
pub fn run(
    catalog: &Catalog,
    reference: Option<Coordinate>,
    product: Option<u32>,
    ids: &[SupplierId],
    max_radius: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let products: Vec<&Product> = match product {
        Some(id) => vec![catalog.product(id)?],
        None if !ids.is_empty() => Vec::new(),
        None => catalog.products().iter().collect(),
    };

    let timer = Timer::start("nearest");
    let results = if products.is_empty() {
        vec![NearestRow {
            product: None,
            nearest: reference.and_then(|r| lookup(find_nearest_among(&r, catalog.suppliers(), ids), max_radius)),
        }]
    } else {
        products
            .into_iter()
            .map(|p| -> Result<NearestRow> {
                let nearest = match reference {
                    Some(r) => lookup(nearest_for(catalog, &r, p, ids)?, max_radius),
                    None => None,
                };
                Ok(NearestRow { product: Some(p), nearest })
            })
            .collect::<Result<Vec<_>>>()?
    };
    timer.stop();

    match format {
        OutputFormat::Json => {
            let output = JsonNearestOutput {
                location: reference,
                max_radius_km: max_radius,
                results,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text(reference, max_radius, &results),
    }

    Ok(())
}

/// Nearest supplier of `product`, optionally narrowed to `ids`
fn nearest_for<'a>(
    catalog: &'a Catalog,
    reference: &Coordinate,
    product: &Product,
    ids: &[SupplierId],
) -> Result<Option<NearestMatch<'a>>> {
    if ids.is_empty() {
        return Ok(catalog.nearest_for_product(reference, product.id)?);
    }

    let candidates = catalog.candidates_for(product.id)?;
    Ok(find_nearest(reference, candidates.into_iter().filter(|s| ids.contains(&s.id))))
}

fn lookup(nearest: Option<NearestMatch<'_>>, max_radius: Option<f64>) -> Option<MatchDetail<'_>> {
    let nearest = match max_radius {
        Some(radius) => nearest?.within_radius(radius),
        None => nearest,
    };
    nearest.map(MatchDetail::from)
}

fn print_text(reference: Option<Coordinate>, max_radius: Option<f64>, results: &[NearestRow<'_>]) {
    Status::header("📍 Nearest Suppliers");

    let Some(reference) = reference else {
        for row in results {
            if let Some(product) = row.product {
                println!("  {}", product.name.bold());
            }
        }
        println!();
        Status::info(LOCATION_PROMPT);
        return;
    };

    println!("  {} {}", "Your location:".dimmed(), reference);
    println!();

    for row in results {
        let title = row.product.map_or("All suppliers", |p| p.name.as_str());
        match &row.nearest {
            Some(m) => println!(
                "  {:<30} {} • {} ({})",
                title.bold(),
                m.supplier.name,
                m.supplier.city.dimmed(),
                m.label.green()
            ),
            None => {
                let reason = match (max_radius, row.product) {
                    (Some(radius), _) => format!("no supplier within {} km", radius),
                    (None, Some(_)) => "no supplier carries this product".to_string(),
                    (None, None) => "no matching supplier".to_string(),
                };
                println!("  {:<30} {}", title.bold(), reason.yellow());
            }
        }
    }
    println!();
}
