//! Data generators for benchmarks

use fake::faker::company::en::CompanyName;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use poidb::errors::PoiResult;
use poidb::{Poi, PoiId};
use rand::Rng;
use std::path::{Path, PathBuf};

pub const AMENITIES: [&str; 6] = ["cafe", "bank", "pharmacy", "school", "restaurant", "bakery"];

/// South-west corner of the generated area, lower Manhattan.
pub const ORIGIN: (f64, f64) = (40.5, -74.3);

/// Generate records scattered uniformly over a `span` x `span` degree square
/// north-east of [`ORIGIN`].
pub fn generate_pois(count: usize, span: f64) -> PoiResult<Vec<Poi>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let latitude = ORIGIN.0 + rng.gen_range(0.0..span);
            let longitude = ORIGIN.1 + rng.gen_range(0.0..span);
            let name: String = CompanyName().fake();
            let phone: String = PhoneNumber().fake();
            let amenity = AMENITIES[rng.gen_range(0..AMENITIES.len())];

            let mut poi = Poi::new(i as PoiId, latitude, longitude)?
                .with_amenity(amenity)
                .with_name(&name);
            // roughly a third of real records carry no phone number
            if rng.gen_bool(0.66) {
                poi = poi.with_phone(&phone);
            }
            Ok(poi)
        })
        .collect()
}

/// Write generated records as a CSV input file under `dir`, returning its path.
pub fn generate_csv(dir: &Path, count: usize, span: f64) -> PoiResult<PathBuf> {
    let pois = generate_pois(count, span)?;
    poidb_cli::output::write_output(dir, &pois, "")?;
    Ok(dir.join(poidb_cli::output::POIS_FILE))
}
