//! gb-locate: find the nearest sustainable-materials supplier.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use greenbuild_catalog::{Catalog, CatalogError, MaterialRequest, ProductSort};
use greenbuild_cli::output::Status;
use greenbuild_geo::{Coordinate, SupplierId};
use greenbuild_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

/// Sustainable construction materials: nearest supplier lookup
#[derive(Parser)]
#[command(name = "gb-locate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Catalog file (defaults to greenbuild.toml if present, else the bundled catalog)
    #[arg(short, long, global = true, env = "GREENBUILD_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Product listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProductOrder {
    /// Catalog order
    Relevance,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Nearest supplier first (needs --lat/--lon)
    Distance,
}

impl From<ProductOrder> for ProductSort {
    fn from(order: ProductOrder) -> Self {
        match order {
            ProductOrder::Relevance => ProductSort::Relevance,
            ProductOrder::PriceAsc => ProductSort::PriceAsc,
            ProductOrder::PriceDesc => ProductSort::PriceDesc,
            ProductOrder::Distance => ProductSort::Distance,
        }
    }
}

/// The user's position, as reported by the device
#[derive(Debug, Clone, Copy, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
}

impl LocationArgs {
    /// The validated reference coordinate, or `None` when no location was given.
    pub fn reference(&self) -> anyhow::Result<Option<Coordinate>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinate::try_new(lat, lon)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Nearest supplier for each product (or one product)
    Nearest {
        #[command(flatten)]
        location: LocationArgs,

        /// Only this product
        #[arg(short, long)]
        product: Option<u32>,

        /// Restrict the search to these supplier ids (repeatable)
        #[arg(short, long = "supplier")]
        suppliers: Vec<u32>,

        /// Hide matches farther than this many kilometers
        #[arg(long)]
        max_radius: Option<f64>,
    },

    /// Rank suppliers by distance
    Rank {
        #[command(flatten)]
        location: LocationArgs,

        /// Only suppliers carrying this product
        #[arg(short, long)]
        product: Option<u32>,

        /// Keep suppliers within this many kilometers
        #[arg(long)]
        radius: Option<f64>,

        /// Maximum number of suppliers to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Great-circle distance between two points
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },

    /// Supplier directory
    Suppliers {
        /// Filter by name (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter by city label, e.g. Palmas-TO
        #[arg(long)]
        city: Option<String>,

        /// Filter by category, e.g. "Materiais Reciclados"
        #[arg(long)]
        category: Option<String>,
    },

    /// List products
    Products {
        #[command(flatten)]
        location: LocationArgs,

        /// Filter by name (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter by category, e.g. Agregados
        #[arg(long)]
        category: Option<String>,

        /// Hide products priced above this many reais
        #[arg(long)]
        max_price: Option<f64>,

        /// Listing order
        #[arg(long, value_enum, default_value_t = ProductOrder::Relevance)]
        sort: ProductOrder,
    },

    /// Suggest sustainable substitutes for a list of materials
    Recommend {
        /// Material as name[:quantity[:unit]], e.g. "Cimento CP2:10:sc" (repeatable)
        #[arg(short, long = "material", required = true)]
        materials: Vec<MaterialRequest>,

        /// Only consider substitutes within this many kilometers (defaults to the catalog setting)
        #[arg(long)]
        max_distance: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = greenbuild_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            if let Some(suggestion) = e.downcast_ref::<CatalogError>().and_then(CatalogError::suggestion) {
                Status::hint(suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli { catalog: catalog_path, format, command, .. } = cli;
    let load_catalog = || -> anyhow::Result<Catalog> {
        let catalog = Catalog::load(catalog_path.as_deref())?;
        tracing::debug!(source = %catalog.source(), "Using catalog");
        Ok(catalog)
    };

    match command {
        Commands::Distance { lat1, lon1, lat2, lon2 } => {
            let from = Coordinate::try_new(lat1, lon1).context("first point")?;
            let to = Coordinate::try_new(lat2, lon2).context("second point")?;
            commands::distance::run(&from, &to, format)
        }
        Commands::Nearest { location, product, suppliers, max_radius } => {
            let reference = location.reference()?;
            let ids: Vec<SupplierId> = suppliers.into_iter().map(SupplierId).collect();
            commands::nearest::run(&load_catalog()?, reference, product, &ids, max_radius, format)
        }
        Commands::Rank { location, product, radius, limit } => {
            let reference = location.reference()?;
            commands::rank::run(&load_catalog()?, reference, product, radius, limit, format)
        }
        Commands::Suppliers { search, city, category } => commands::suppliers::run(
            &load_catalog()?,
            &search,
            city.as_deref(),
            category.as_deref(),
            format,
        ),
        Commands::Products { location, search, category, max_price, sort } => {
            let query = commands::suppliers::ProductQuery {
                reference: location.reference()?,
                search: &search,
                category: category.as_deref(),
                max_price,
                sort: sort.into(),
            };
            commands::suppliers::run_products(&load_catalog()?, &query, format)
        }
        Commands::Recommend { materials, max_distance } => {
            let catalog = load_catalog()?;
            let max_distance = max_distance.unwrap_or(catalog.settings().max_radius_km);
            commands::recommend::run(&catalog, &materials, max_distance, format)
        }
    }
}
