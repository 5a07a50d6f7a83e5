//! Database setup for benchmarks

use poidb::errors::PoiResult;
use poidb::{Poi, PoiDb};
use poidb_spatial::SpatialModule;

/// Open an empty database with the R-tree geo index.
pub fn create_spatial_db() -> PoiResult<PoiDb> {
    PoiDb::builder().load_module(SpatialModule).open()
}

/// Open a database without a geo index; only attribute queries work.
pub fn create_attribute_db() -> PoiResult<PoiDb> {
    PoiDb::builder().open()
}

/// Open a spatial database already holding `pois`.
pub fn create_loaded_db(pois: Vec<Poi>) -> PoiResult<PoiDb> {
    let db = create_spatial_db()?;
    db.insert_many(pois)?;
    Ok(db)
}
