use poidb::common::BoundingBox;
use poidb::errors::ErrorKind;
use poidb::query::Predicates;
use poidb::store::DuplicatePolicy;
use poidb_cli::ingest::load_csv;
use poidb_int_test::test_util::{cleanup, create_test_context, create_test_context_with, run_test};

const ROWS: [&str; 5] = [
    "1,cafe,Blue Bottle,40.0,-74.0,POINT (-74 40),111",
    "2,cafe,Joe,40.05,-73.95,POINT (-73.95 40.05),222",
    "3,bank,Chase,,,POINT (-73.99 40),111",
    "x,cafe,Broken,40.0,-74.0,,",
    "4,cafe,Far,95.0,-74.0,,",
];

#[test]
fn test_load_and_query() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.write_csv("pois.csv", &ROWS)?;
            let report = load_csv(&ctx.db(), &path)?;
            assert_eq!(report.rows, 5);
            assert_eq!(report.stored, 3);
            assert_eq!(report.invalid, 2);
            assert!(report.duplicates.is_empty());

            // id 3 has no lat/lon columns and is placed by its geometry
            let bank = ctx.db().get(3)?;
            assert_eq!((bank.latitude(), bank.longitude()), (40.0, -73.99));

            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let result = ctx.db().find(&Predicates::new().phone("111").bbox(bbox))?;
            assert_eq!(result.ids(), vec![1, 3]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_reloading_under_skip_policy_is_idempotent() {
    run_test(
        || create_test_context_with(DuplicatePolicy::Skip),
        |ctx| {
            let path = ctx.write_csv("pois.csv", &ROWS)?;
            load_csv(&ctx.db(), &path)?;
            let before = ctx.db().find(&Predicates::new().amenity("cafe"))?;

            let report = load_csv(&ctx.db(), &path)?;
            assert_eq!(report.stored, 0);
            assert_eq!(report.duplicates, vec![1, 2, 3]);

            let after = ctx.db().find(&Predicates::new().amenity("cafe"))?;
            assert_eq!(before.ids(), after.ids());
            assert_eq!(before.log(), after.log());
            assert_eq!(ctx.db().size(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_duplicate_id_under_reject_policy() {
    run_test(
        create_test_context,
        |ctx| {
            let path = ctx.write_csv(
                "pois.csv",
                &["1,cafe,A,40.0,-74.0,,", "1,bank,B,41.0,-75.0,,"],
            )?;
            let err = load_csv(&ctx.db(), &path).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DuplicateRecord);

            // the first record stays, the duplicate left no trace in the indexes
            assert_eq!(ctx.db().get(1)?.amenity(), Some("cafe"));
            assert!(ctx.db().find(&Predicates::new().amenity("bank"))?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_missing_input_file() {
    run_test(
        create_test_context,
        |ctx| {
            let err = load_csv(&ctx.db(), &ctx.path().join("absent.csv")).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FileNotFound);
            Ok(())
        },
        cleanup,
    )
}
