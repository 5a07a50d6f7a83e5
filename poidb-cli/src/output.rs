//! Query output: `pois.csv` with the matching records and `log.txt` with the
//! query log.

use serde::Serialize;
use std::fs;
use std::path::Path;

use poidb::errors::{ErrorKind, PoiError, PoiResult};
use poidb::Poi;

pub const POIS_FILE: &str = "pois.csv";
pub const LOG_FILE: &str = "log.txt";

#[derive(Debug, Serialize)]
struct PoiRecord<'a> {
    id: u64,
    amenity: &'a str,
    name: &'a str,
    latitude: f64,
    longitude: f64,
    geometry: String,
    phone: &'a str,
}

impl<'a> From<&'a Poi> for PoiRecord<'a> {
    fn from(poi: &'a Poi) -> Self {
        PoiRecord {
            id: poi.id(),
            amenity: poi.amenity().unwrap_or_default(),
            name: poi.name().unwrap_or_default(),
            latitude: poi.latitude(),
            longitude: poi.longitude(),
            geometry: poi.wkt(),
            phone: poi.phone().unwrap_or_default(),
        }
    }
}

/// Writes `records` and `log` into `dir`, creating it if needed and
/// replacing earlier output files.
pub fn write_output(dir: &Path, records: &[Poi], log: &str) -> PoiResult<()> {
    fs::create_dir_all(dir)?;

    let pois_path = dir.join(POIS_FILE);
    let mut writer = csv::Writer::from_path(&pois_path).map_err(|e| {
        PoiError::new(
            &format!("Cannot create {}: {}", pois_path.display(), e),
            ErrorKind::IOError,
        )
    })?;
    // header is only emitted with the first record
    if records.is_empty() {
        writer
            .write_record(["id", "amenity", "name", "latitude", "longitude", "geometry", "phone"])
            .map_err(write_error)?;
    }
    for poi in records {
        writer.serialize(PoiRecord::from(poi)).map_err(write_error)?;
    }
    writer.flush()?;

    fs::write(dir.join(LOG_FILE), log)?;
    log::debug!("Wrote {} records to {}", records.len(), dir.display());
    Ok(())
}

fn write_error(err: csv::Error) -> PoiError {
    PoiError::new(&format!("Failed to write CSV: {}", err), ErrorKind::IOError)
}
