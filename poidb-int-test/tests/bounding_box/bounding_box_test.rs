use poidb::common::BoundingBox;
use poidb::errors::ErrorKind;
use poidb::query::{PredicateKind, Predicates};
use poidb::Poi;
use poidb_int_test::test_util::{cleanup, create_sample_context, create_test_context, run_test};

#[test]
fn test_single_cafe_in_bounding_box() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.db().insert(Poi::new(1, 40.0, -74.0)?.with_amenity("cafe"))?;
            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let result = ctx.db().find(&Predicates::new().amenity("cafe").bbox(bbox))?;
            assert_eq!(result.ids(), vec![1]);
            assert_eq!(result.records()[0].amenity(), Some("cafe"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_amenity_in_bounding_box() {
    run_test(
        create_sample_context,
        |ctx| {
            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let result = ctx.db().find(&Predicates::new().amenity("cafe").bbox(bbox))?;
            assert_eq!(result.ids(), vec![1, 2, 6]);

            let result = ctx
                .db()
                .find(&Predicates::new().name("Blue Bottle").bbox(bbox))?;
            assert_eq!(result.ids(), vec![1]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_corner_order_does_not_matter() {
    run_test(
        create_sample_context,
        |ctx| {
            let a = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let b = BoundingBox::parse("39.90,-73.90,40.10,-74.10")?;
            let ra = ctx.db().find(&Predicates::new().bbox(a))?;
            let rb = ctx.db().find(&Predicates::new().bbox(b))?;
            assert_eq!(ra.ids(), rb.ids());
            assert_eq!(ra.ids(), vec![1, 2, 3, 6]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_bakery_in_bounding_box_is_a_no_match() {
    run_test(
        create_sample_context,
        |ctx| {
            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let result = ctx.db().find(&Predicates::new().amenity("bakery").bbox(bbox))?;
            assert!(result.is_empty());
            assert_eq!(result.candidate_count(), 0);
            assert_eq!(
                result.no_match().map(|m| m.predicate()),
                Some(PredicateKind::Amenity)
            );
            assert_eq!(result.log(), "no POI found with amenity 'bakery'");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_circle_hits_outside_the_box_are_dropped() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            // inside the circumscribed circle but above the box
            db.insert(Poi::new(1, 40.12, -74.0)?)?;
            db.insert(Poi::new(2, 40.0, -74.0)?)?;

            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let result = db.find(&Predicates::new().bbox(bbox))?;
            assert_eq!(result.ids(), vec![2]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_box_edges_are_inclusive() {
    run_test(
        create_test_context,
        |ctx| {
            let db = ctx.db();
            db.insert(Poi::new(1, 40.1, -74.0)?)?;
            db.insert(Poi::new(2, 40.0, -73.9)?)?;
            db.insert(Poi::new(3, 40.0, -73.89)?)?;

            let bbox = BoundingBox::parse("40.1,-74.1,39.9,-73.9")?;
            let result = db.find(&Predicates::new().bbox(bbox))?;
            assert_eq!(result.ids(), vec![1, 2]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_empty_box_area_is_a_no_match() {
    run_test(
        create_sample_context,
        |ctx| {
            let bbox = BoundingBox::parse("10,10,11,11")?;
            let result = ctx.db().find(&Predicates::new().bbox(bbox))?;
            assert_eq!(
                result.no_match().map(|m| m.predicate()),
                Some(PredicateKind::BoundingBox)
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_malformed_bounding_box() {
    for text in ["40.1,-74.1,39.9", "40.1,-74.1,39.9,x", "", "91,0,0,0"] {
        let err = BoundingBox::parse(text).unwrap_err();
        assert!(
            matches!(
                err.kind(),
                ErrorKind::MalformedBoundingBox | ErrorKind::InvalidCoordinate
            ),
            "unexpected error for {:?}: {:?}",
            text,
            err
        );
    }
}
