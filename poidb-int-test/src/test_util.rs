use poidb::errors::{ErrorKind, PoiError, PoiResult};
use poidb::store::DuplicatePolicy;
use poidb::{Poi, PoiDb, PoiId};
use poidb_spatial::SpatialModule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

pub const CSV_HEADER: &str = "id,amenity,name,latitude,longitude,geometry,phone";

/// Runs `test` against the context built by `before`, then always runs
/// `after`. Errors and panics from any phase fail the test with the phase
/// named.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> PoiResult<()>,
    B: Fn() -> PoiResult<TestContext>,
    A: Fn(TestContext) -> PoiResult<()>,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| test(ctx.clone())));
    let after_result = after(ctx);

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed after {:?}: {:?}", start_time.elapsed(), e),
        Err(panic_err) => {
            let message = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            panic!("Test panicked after {:?}: {}", start_time.elapsed(), message);
        }
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

/// A database with the spatial module loaded plus a scratch directory for
/// CSV input and query output.
#[derive(Clone)]
pub struct TestContext {
    db: PoiDb,
    dir: Arc<TempDir>,
}

impl TestContext {
    pub fn new(db: PoiDb, dir: TempDir) -> Self {
        Self {
            db,
            dir: Arc::new(dir),
        }
    }

    pub fn db(&self) -> PoiDb {
        self.db.clone()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a CSV file with the standard header and `rows` into the
    /// scratch directory.
    pub fn write_csv(&self, file_name: &str, rows: &[&str]) -> PoiResult<PathBuf> {
        let path = self.path().join(file_name);
        let mut content = String::from(CSV_HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        fs::write(&path, content)?;
        Ok(path)
    }
}

pub fn create_test_context() -> PoiResult<TestContext> {
    create_test_context_with(DuplicatePolicy::Reject)
}

pub fn create_test_context_with(policy: DuplicatePolicy) -> PoiResult<TestContext> {
    let dir = TempDir::new().map_err(|e| {
        PoiError::new(
            &format!("Failed to create scratch directory: {}", e),
            ErrorKind::IOError,
        )
    })?;
    let db = PoiDb::builder()
        .duplicate_policy(policy)
        .load_module(SpatialModule)
        .open()?;
    Ok(TestContext::new(db, dir))
}

/// A context whose database is already loaded with [`sample_pois`].
pub fn create_sample_context() -> PoiResult<TestContext> {
    let ctx = create_test_context()?;
    ctx.db().insert_many(sample_pois()?)?;
    Ok(ctx)
}

/// Drops the context. The scratch directory is removed with the last clone.
pub fn cleanup(ctx: TestContext) -> PoiResult<()> {
    drop(ctx);
    Ok(())
}

/// A small fixture around lower Manhattan:
///
/// | id | amenity  | name          | lat     | lon      | phone |
/// |----|----------|---------------|---------|----------|-------|
/// | 1  | cafe     | Blue Bottle   | 40.0000 | -74.0000 | 111   |
/// | 2  | cafe     | Joe           | 40.0500 | -73.9500 | 222   |
/// | 3  | bank     | Chase         | 40.0000 | -73.9900 | 111   |
/// | 4  | cafe     | Blue Bottle   | 40.2000 | -74.0000 |       |
/// | 5  | pharmacy | Duane Reade   | 39.8500 | -74.1000 | 333   |
/// | 6  | cafe     |               | 40.0900 | -73.9100 |       |
pub fn sample_pois() -> PoiResult<Vec<Poi>> {
    Ok(vec![
        Poi::new(1, 40.0, -74.0)?
            .with_amenity("cafe")
            .with_name("Blue Bottle")
            .with_phone("111"),
        Poi::new(2, 40.05, -73.95)?
            .with_amenity("cafe")
            .with_name("Joe")
            .with_phone("222"),
        Poi::new(3, 40.0, -73.99)?
            .with_amenity("bank")
            .with_name("Chase")
            .with_phone("111"),
        Poi::new(4, 40.2, -74.0)?
            .with_amenity("cafe")
            .with_name("Blue Bottle"),
        Poi::new(5, 39.85, -74.1)?
            .with_amenity("pharmacy")
            .with_name("Duane Reade")
            .with_phone("333"),
        Poi::new(6, 40.09, -73.91)?.with_amenity("cafe"),
    ])
}

/// `count` random records in the square `[lat0, lat0 + span] x [lon0, lon0 + span]`,
/// with amenities drawn from a short list.
pub fn random_pois(seed: u64, count: usize, lat0: f64, lon0: f64, span: f64) -> PoiResult<Vec<Poi>> {
    const AMENITIES: [&str; 4] = ["cafe", "bank", "pharmacy", "school"];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let latitude = lat0 + rng.random_range(0.0..span);
            let longitude = lon0 + rng.random_range(0.0..span);
            let amenity = AMENITIES[rng.random_range(0..AMENITIES.len())];
            Ok(Poi::new(i as PoiId, latitude, longitude)?.with_amenity(amenity))
        })
        .collect()
}
