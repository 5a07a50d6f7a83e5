//! CSV ingestion.
//!
//! Input files carry the columns `id,amenity,name,latitude,longitude,geometry,phone`
//! with a header row. Rows that cannot become a valid record are skipped with
//! a warning rather than failing the load:
//!
//! - `id` is not a non-negative integer;
//! - `latitude`/`longitude` do not parse or are out of range.
//!
//! When both coordinate columns are empty the coordinate is read from the
//! `geometry` column instead, which must then hold a `POINT (lon lat)`.

use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use poidb::errors::{ErrorKind, PoiError, PoiResult};
use poidb::{Poi, PoiDb, PoiId};
use poidb_spatial::wkt;

/// One CSV row, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiRow {
    pub id: String,
    #[serde(default)]
    pub amenity: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub geometry: String,
    #[serde(default)]
    pub phone: String,
}

impl PoiRow {
    /// Converts the row into a record, or explains why it cannot be one.
    pub fn to_poi(&self) -> PoiResult<Poi> {
        let id = self.id.trim();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PoiError::new(
                &format!("POI id '{}' is not a non-negative integer", self.id),
                ErrorKind::InvalidDataType,
            ));
        }
        let id: PoiId = id.parse()?;

        let latitude = self.latitude.trim();
        let longitude = self.longitude.trim();
        let poi = if latitude.is_empty() && longitude.is_empty() {
            let coordinate = wkt::parse_point(&self.geometry)?;
            Poi::new(id, coordinate.latitude, coordinate.longitude)?
        } else {
            Poi::new(id, latitude.parse()?, longitude.parse()?)?
        };

        Ok(poi
            .with_amenity(&self.amenity)
            .with_name(&self.name)
            .with_phone(&self.phone))
    }
}

/// What a CSV load did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read, header excluded.
    pub rows: usize,
    /// Records stored.
    pub stored: usize,
    /// Rows skipped because they were not valid records.
    pub invalid: usize,
    /// Ids skipped because they were already stored.
    pub duplicates: Vec<PoiId>,
}

/// Reads the valid records of a CSV file, counting the invalid rows.
///
/// # Errors
///
/// `FileNotFound` if `path` does not exist, `IOError` or `EncodingError`
/// if the file cannot be read as CSV.
pub fn read_pois(path: &Path) -> PoiResult<(Vec<Poi>, usize)> {
    let file = File::open(path).map_err(|e| {
        log::error!("Cannot open input file {}: {}", path.display(), e);
        PoiError::new_with_cause(
            &format!("Cannot open input file {}", path.display()),
            ErrorKind::FileNotFound,
            e.into(),
        )
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(file);

    let mut pois = Vec::new();
    let mut invalid = 0;
    for (line, row) in reader.deserialize::<PoiRow>().enumerate() {
        let row = row.map_err(csv_error)?;
        match row.to_poi() {
            Ok(poi) => pois.push(poi),
            Err(e) => {
                // header is line 1
                log::warn!("Skipping row {}: {}", line + 2, e);
                invalid += 1;
            }
        }
    }
    Ok((pois, invalid))
}

/// Loads a CSV file into `db`.
///
/// # Errors
///
/// Everything [`read_pois`] returns, plus `DuplicateRecord` under the
/// reject policy.
pub fn load_csv(db: &PoiDb, path: &Path) -> PoiResult<LoadReport> {
    let (pois, invalid) = read_pois(path)?;
    let rows = pois.len() + invalid;
    let report = db.insert_many(pois)?;

    log::info!(
        "Stored {} of {} rows from {} ({} invalid, {} duplicate)",
        report.inserted,
        rows,
        path.display(),
        invalid,
        report.skipped.len()
    );
    Ok(LoadReport {
        rows,
        stored: report.inserted,
        invalid,
        duplicates: report.skipped,
    })
}

fn csv_error(err: csv::Error) -> PoiError {
    let kind = if err.is_io_error() {
        ErrorKind::IOError
    } else {
        ErrorKind::EncodingError
    };
    PoiError::new(&format!("Failed to read CSV: {}", err), kind)
}
