use poidb::common::BoundingBox;
use poidb::errors::ErrorKind;
use poidb::query::Predicates;
use poidb_int_test::test_util::{cleanup, create_sample_context, run_test};

#[test]
fn test_id_with_other_predicate_is_rejected() {
    run_test(
        create_sample_context,
        |ctx| {
            let err = ctx.db().find(&Predicates::new().id(1).amenity("cafe")).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPredicateCombination);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_radius_without_longitude_is_rejected() {
    run_test(
        create_sample_context,
        |ctx| {
            let err = ctx
                .db()
                .find(&Predicates::new().latitude(40.0).radius_km(5.0))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPredicateCombination);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_latitude_and_longitude_without_radius_is_rejected() {
    run_test(
        create_sample_context,
        |ctx| {
            let err = ctx
                .db()
                .find(&Predicates::new().latitude(40.0).longitude(-74.0))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPredicateCombination);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_bounding_box_with_latitude_is_rejected() {
    run_test(
        create_sample_context,
        |ctx| {
            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let err = ctx
                .db()
                .find(&Predicates::new().bbox(bbox).latitude(40.0))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPredicateCombination);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_empty_predicate_set_is_rejected() {
    run_test(
        create_sample_context,
        |ctx| {
            let err = ctx.db().find(&Predicates::new()).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NoPredicate);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_out_of_range_coordinate_is_rejected() {
    run_test(
        create_sample_context,
        |ctx| {
            let err = ctx.db().find(&Predicates::new().latitude(91.0)).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidCoordinate);
            Ok(())
        },
        cleanup,
    )
}
