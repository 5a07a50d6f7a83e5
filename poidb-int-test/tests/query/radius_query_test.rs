use poidb::query::{PredicateKind, Predicates};
use poidb::Poi;
use poidb_int_test::test_util::{cleanup, create_sample_context, create_test_context, run_test};

#[test]
fn test_radius_query() {
    run_test(
        create_sample_context,
        |ctx| {
            // id 3 is 0.01 degrees of longitude away (~0.85 km), id 2 is ~5.6 km north
            let result = ctx
                .db()
                .find(&Predicates::new().latitude(40.0).longitude(-74.0).radius_km(5.0))?;
            assert_eq!(result.ids(), vec![1, 3]);

            let result = ctx.db().find(
                &Predicates::new()
                    .amenity("cafe")
                    .latitude(40.0)
                    .longitude(-74.0)
                    .radius_km(5.0),
            )?;
            assert_eq!(result.ids(), vec![1]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_zero_radius_matches_only_the_center() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx
                .db()
                .find(&Predicates::new().latitude(40.0).longitude(-74.0).radius_km(0.0))?;
            assert_eq!(result.ids(), vec![1]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_radius_border_is_inclusive() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.insert(Poi::new(1, 0.0, 0.0)?)?;
            db.insert(Poi::new(2, 1.0, 0.0)?)?;
            db.insert(Poi::new(3, 1.01, 0.0)?)?;

            // one degree of latitude is 111 km
            let result = db.find(&Predicates::new().latitude(0.0).longitude(0.0).radius_km(111.0))?;
            assert_eq!(result.ids(), vec![1, 2]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_empty_radius_is_a_no_match() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx
                .db()
                .find(&Predicates::new().latitude(10.0).longitude(10.0).radius_km(1.0))?;
            assert!(result.is_empty());
            assert_eq!(
                result.no_match().map(|m| m.predicate()),
                Some(PredicateKind::Radius)
            );
            Ok(())
        },
        cleanup,
    )
}
