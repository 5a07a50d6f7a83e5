//! Query command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

use poidb::common::BoundingBox;
use poidb::query::{Predicates, QueryPlanner};
use poidb::store::DuplicatePolicy;
use poidb::PoiDb;
use poidb_cli::collect::metrics_line;
use poidb_cli::{ingest, output};
use poidb_spatial::SpatialModule;

use crate::Duplicates;

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// CSV file to load POIs from
    #[arg(long)]
    pub store: PathBuf,

    /// Directory to write pois.csv and log.txt into
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// POI id; excludes every other predicate
    #[arg(long)]
    pub id: Option<u64>,

    /// Amenity type, e.g. cafe
    #[arg(long)]
    pub amenity: Option<String>,

    /// Facility name
    #[arg(long)]
    pub name: Option<String>,

    /// Latitude in degrees; with --longitude it is a radius centre
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Longitude in degrees; with --latitude it is a radius centre
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Radius in km around --latitude/--longitude
    #[arg(long)]
    pub radius: Option<f64>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Bounding box "topLeftLat,topLeftLon,bottomRightLat,bottomRightLon"
    #[arg(long, allow_hyphen_values = true)]
    pub bounding_box: Option<String>,

    /// What to do with rows whose id is already loaded
    #[arg(long, value_enum, default_value_t = Duplicates::Reject)]
    pub duplicates: Duplicates,
}

impl QueryArgs {
    fn predicates(&self) -> Result<Predicates> {
        let mut predicates = Predicates::new();
        if let Some(id) = self.id {
            predicates = predicates.id(id);
        }
        if let Some(amenity) = &self.amenity {
            predicates = predicates.amenity(amenity);
        }
        if let Some(name) = &self.name {
            predicates = predicates.name(name);
        }
        if let Some(latitude) = self.latitude {
            predicates = predicates.latitude(latitude);
        }
        if let Some(longitude) = self.longitude {
            predicates = predicates.longitude(longitude);
        }
        if let Some(radius) = self.radius {
            predicates = predicates.radius_km(radius);
        }
        if let Some(phone) = &self.phone {
            predicates = predicates.phone(phone);
        }
        if let Some(bbox) = &self.bounding_box {
            let bbox = BoundingBox::parse(bbox)
                .with_context(|| format!("Invalid bounding box '{}'", bbox))?;
            predicates = predicates.bbox(bbox);
        }
        Ok(predicates)
    }
}

impl From<Duplicates> for DuplicatePolicy {
    fn from(value: Duplicates) -> Self {
        match value {
            Duplicates::Reject => DuplicatePolicy::Reject,
            Duplicates::Skip => DuplicatePolicy::Skip,
        }
    }
}

/// Run the query command
pub fn run(args: QueryArgs) -> Result<()> {
    let predicates = args.predicates()?;
    QueryPlanner::plan(&predicates).with_context(|| format!("Invalid query {}", predicates))?;

    let db = PoiDb::builder()
        .duplicate_policy(args.duplicates.into())
        .load_module(SpatialModule)
        .open()
        .with_context(|| "Failed to open database")?;

    let report = ingest::load_csv(&db, &args.store)
        .with_context(|| format!("Failed to load {}", args.store.display()))?;
    println!(
        "Loaded {} POIs from {} ({} invalid rows, {} duplicates skipped)",
        report.stored,
        args.store.display(),
        report.invalid,
        report.duplicates.len()
    );

    let start = Instant::now();
    let result = db
        .find(&predicates)
        .with_context(|| format!("Query {} failed", predicates))?;
    let elapsed = start.elapsed();

    let log = format!(
        "{}\n{}",
        result.log(),
        metrics_line(elapsed.as_secs_f64(), result.throughput(elapsed))
    );

    match &args.output {
        Some(dir) => write(dir, result.records(), &log)?,
        None => println!("{}", log),
    }
    println!("Found {} POIs", result.len());
    Ok(())
}

fn write(dir: &Path, records: &[poidb::Poi], log: &str) -> Result<()> {
    output::write_output(dir, records, log)
        .with_context(|| format!("Failed to write output to {}", dir.display()))
}
