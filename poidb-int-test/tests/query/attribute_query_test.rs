use poidb::query::{PredicateKind, Predicates};
use poidb_int_test::test_util::{cleanup, create_sample_context, run_test};

#[test]
fn test_find_by_amenity() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().amenity("cafe"))?;
            assert_eq!(result.ids(), vec![1, 2, 4, 6]);
            assert!(result.no_match().is_none());
            assert_eq!(
                result.log(),
                "condition 1: amenity is cafe, found 4 POIs\nintersection found 4 POIs"
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_amenity_and_name() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx
                .db()
                .find(&Predicates::new().amenity("cafe").name("Blue Bottle"))?;
            assert_eq!(result.ids(), vec![1, 4]);
            assert_eq!(result.candidate_count(), 6);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_amenity_and_phone() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().amenity("cafe").phone("111"))?;
            assert_eq!(result.ids(), vec![1]);

            let result = ctx.db().find(&Predicates::new().phone("111"))?;
            assert_eq!(result.ids(), vec![1, 3]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_id() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().id(3))?;
            assert_eq!(result.ids(), vec![3]);
            assert_eq!(result.records()[0].amenity(), Some("bank"));
            assert_eq!(
                result.log(),
                "condition: id is 3, found 1 POI\nintersection found 1 POIs"
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_unknown_id_is_a_no_match() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().id(99))?;
            assert!(result.is_empty());
            let no_match = result.no_match().expect("no-match report");
            assert_eq!(no_match.predicate(), PredicateKind::Id);
            assert_eq!(no_match.message(), "POI ID 99 does not exist");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_exact_latitude() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().latitude(40.0))?;
            assert_eq!(result.ids(), vec![1, 3]);

            let result = ctx.db().find(&Predicates::new().latitude(40.0).amenity("bank"))?;
            assert_eq!(result.ids(), vec![3]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_early_exit_reports_first_empty_predicate() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx
                .db()
                .find(&Predicates::new().name("Nowhere").amenity("cafe").phone("000"))?;
            assert!(result.is_empty());

            // amenity is evaluated before name, phone is never reached
            assert_eq!(
                result.log(),
                "condition 1: amenity is cafe, found 4 POIs\nno POI found with name 'Nowhere'"
            );
            assert_eq!(result.candidate_count(), 4);
            assert_eq!(
                result.no_match().map(|m| m.predicate()),
                Some(PredicateKind::Name)
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_non_empty_predicates_with_empty_intersection() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().amenity("bank").phone("222"))?;
            assert!(result.is_empty());
            assert!(result.no_match().is_none());
            assert!(result.log().ends_with("intersection found 0 POIs"));
            Ok(())
        },
        cleanup,
    )
}
