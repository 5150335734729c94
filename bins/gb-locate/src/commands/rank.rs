//! Rank command - suppliers sorted by distance

use crate::OutputFormat;
use anyhow::{bail, Result};
use greenbuild_catalog::Catalog;
use greenbuild_cli::output::{format_count, format_km, Status};
use greenbuild_geo::{rank_by_distance, rank_within_radius, Coordinate, Supplier};
use greenbuild_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RankedSupplier<'a> {
    rank: usize,
    supplier: &'a Supplier,
    distance_km: f64,
}

/// Run rank command
pub fn run(
    catalog: &Catalog,
    reference: Option<Coordinate>,
    product: Option<u32>,
    radius: Option<f64>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let Some(reference) = reference else {
        bail!("Ranking needs your location: pass --lat and --lon");
    };

    let candidates: Vec<Supplier> = match product {
        Some(id) => catalog.candidates_for(id)?.into_iter().cloned().collect(),
        None => catalog.suppliers().to_vec(),
    };

    let timer = Timer::start("rank");
    let mut ranked = match radius {
        Some(radius) => rank_within_radius(&reference, &candidates, radius),
        None => rank_by_distance(&reference, &candidates),
    };
    timer.stop();

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    let rows: Vec<RankedSupplier<'_>> = ranked
        .iter()
        .filter_map(|r| catalog.supplier(r.id).map(|supplier| (supplier, r.distance_km)))
        .enumerate()
        .map(|(i, (supplier, distance_km))| RankedSupplier {
            rank: i + 1,
            supplier,
            distance_km,
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            Status::header("🧭 Suppliers by Distance");
            println!("  {} {}", "Your location:".dimmed(), reference);
            println!();

            for row in &rows {
                println!(
                    "  {:>3}. {:<45} {:<25} {:>10}",
                    row.rank,
                    row.supplier.name,
                    row.supplier.city.dimmed(),
                    format_km(row.distance_km).cyan()
                );
            }

            println!();
            println!("  {}", format_count(rows.len(), "supplier", "suppliers").dimmed());
        }
    }

    Ok(())
}
