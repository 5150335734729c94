//! Distance command - great-circle distance between two points

use crate::OutputFormat;
use anyhow::Result;
use greenbuild_cli::output::format_km;
use greenbuild_geo::{haversine_distance, Coordinate};

pub fn run(from: &Coordinate, to: &Coordinate, format: OutputFormat) -> Result<()> {
    let distance_km = haversine_distance(from, to);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "from": from,
                "to": to,
                "distance_km": distance_km,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{} → {}: {}", from, to, format_km(distance_km));
        }
    }

    Ok(())
}
