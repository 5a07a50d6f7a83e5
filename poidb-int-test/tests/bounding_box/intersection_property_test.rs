use std::collections::BTreeSet;

use poidb::common::BoundingBox;
use poidb::query::Predicates;
use poidb::PoiId;
use poidb_int_test::test_util::{cleanup, create_test_context, random_pois, run_test};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_box(rng: &mut StdRng) -> BoundingBox {
    let lat_a = 40.0 + rng.random_range(0.0..1.0);
    let lat_b = 40.0 + rng.random_range(0.0..1.0);
    let lon_a = -74.0 + rng.random_range(0.0..1.0);
    let lon_b = -74.0 + rng.random_range(0.0..1.0);
    BoundingBox::from_corners(lat_a, lon_a, lat_b, lon_b).unwrap()
}

#[test]
fn test_bounding_box_matches_linear_scan() {
    run_test(
        create_test_context,
        |ctx| {
            let pois = random_pois(7, 2000, 40.0, -74.0, 1.0)?;
            ctx.db().insert_many(pois.clone())?;

            let mut rng = StdRng::seed_from_u64(11);
            for _ in 0..50 {
                let bbox = random_box(&mut rng);
                let expected: Vec<PoiId> = pois
                    .iter()
                    .filter(|poi| bbox.contains(&poi.geometry()))
                    .map(|poi| poi.id())
                    .collect();

                let result = ctx.db().find(&Predicates::new().bbox(bbox))?;
                assert_eq!(result.ids(), expected, "box {}", bbox);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_result_is_intersection_of_single_predicates() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.insert_many(random_pois(3, 1000, 40.0, -74.0, 1.0)?)?;

            let mut rng = StdRng::seed_from_u64(5);
            for amenity in ["cafe", "bank", "pharmacy", "school"] {
                let bbox = random_box(&mut rng);

                let by_amenity: BTreeSet<PoiId> = db
                    .find(&Predicates::new().amenity(amenity))?
                    .ids()
                    .into_iter()
                    .collect();
                let by_box: BTreeSet<PoiId> = db
                    .find(&Predicates::new().bbox(bbox))?
                    .ids()
                    .into_iter()
                    .collect();
                let combined = db.find(&Predicates::new().amenity(amenity).bbox(bbox))?;

                let expected: Vec<PoiId> = by_amenity.intersection(&by_box).copied().collect();
                assert_eq!(combined.ids(), expected);
                assert!(combined.records().iter().all(|p| p.amenity() == Some(amenity)));
            }
            Ok(())
        },
        cleanup,
    )
}
