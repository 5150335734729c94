//! Recommend command - sustainable substitutes for a material list

use crate::OutputFormat;
use anyhow::Result;
use greenbuild_catalog::{recommend, Catalog, MaterialRequest, RecommendationKind, RecommendationSummary};
use greenbuild_cli::output::{format_km, Status};
use owo_colors::OwoColorize;

/// Run recommend command
pub fn run(
    catalog: &Catalog,
    materials: &[MaterialRequest],
    max_distance_km: f64,
    format: OutputFormat,
) -> Result<()> {
    let recommendations = recommend(catalog.substitutions(), materials, max_distance_km);
    let summary = RecommendationSummary::from_recommendations(&recommendations);

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "max_distance_km": max_distance_km,
            "recommendations": recommendations,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Status::header("♻ Sustainable Alternatives");
    println!(
        "  {}",
        format!("Only suppliers within {} km are considered", max_distance_km).dimmed()
    );
    println!();

    if recommendations.is_empty() {
        Status::warning("No alternatives found within the chosen distance");
        return Ok(());
    }

    for rec in &recommendations {
        let price = rec.price.as_deref().unwrap_or("on quote");
        let distance = rec.distance_km.map_or_else(|| "---".to_string(), format_km);
        let marker = match rec.kind {
            RecommendationKind::Catalog => "●".green().to_string(),
            RecommendationKind::Fallback => "○".yellow().to_string(),
        };

        println!(
            "  {} {} {} {}",
            marker,
            rec.original,
            "→".dimmed(),
            rec.substitute.bold()
        );
        println!(
            "      {} {}%  {} -{}% CO₂  {} {}  {} {}  {} {} {}",
            "compat".dimmed(),
            rec.compatibility,
            "·".dimmed(),
            rec.co2_reduction,
            "·".dimmed(),
            price,
            "·".dimmed(),
            distance,
            "·".dimmed(),
            rec.quantity,
            rec.unit
        );
    }

    println!();
    Status::success(&format!(
        "{} alternatives, average compatibility {}%, combined CO₂ reduction {}%",
        summary.count, summary.average_compatibility, summary.total_co2_reduction
    ));

    Ok(())
}
