use std::fs;
use std::time::Instant;

use poidb::common::BoundingBox;
use poidb::query::Predicates;
use poidb_cli::collect::{collect, extract_metrics, metrics_line, metrics_pattern};
use poidb_cli::ingest::{load_csv, read_pois};
use poidb_cli::output::{write_output, LOG_FILE, POIS_FILE};
use poidb_int_test::test_util::{cleanup, create_sample_context, create_test_context, run_test};

#[test]
fn test_output_round_trip() {
    run_test(
        create_sample_context,
        |ctx| {
            let bbox = BoundingBox::parse("40.10,-74.10,39.90,-73.90")?;
            let result = ctx.db().find(&Predicates::new().amenity("cafe").bbox(bbox))?;
            let out = ctx.path().join("run");
            write_output(&out, result.records(), result.log())?;

            let (read_back, invalid) = read_pois(&out.join(POIS_FILE))?;
            assert_eq!(invalid, 0);
            assert_eq!(read_back, result.records());
            assert_eq!(fs::read_to_string(out.join(LOG_FILE))?, result.log());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_written_output_loads_into_a_fresh_database() {
    run_test(
        create_sample_context,
        |ctx| {
            let result = ctx.db().find(&Predicates::new().amenity("cafe"))?;
            let out = ctx.path().join("run");
            write_output(&out, result.records(), result.log())?;

            let fresh = create_test_context()?;
            load_csv(&fresh.db(), &out.join(POIS_FILE))?;
            let again = fresh.db().find(&Predicates::new().amenity("cafe"))?;
            assert_eq!(again.records(), result.records());
            cleanup(fresh)
        },
        cleanup,
    )
}

#[test]
fn test_collect_over_query_runs() {
    run_test(
        create_sample_context,
        |ctx| {
            let pattern = metrics_pattern()?;
            for (run, amenity) in [("run_a", "cafe"), ("run_b", "bank")] {
                let start = Instant::now();
                let result = ctx.db().find(&Predicates::new().amenity(amenity))?;
                let elapsed = start.elapsed();

                let log = format!(
                    "{}\n{}",
                    result.log(),
                    metrics_line(elapsed.as_secs_f64(), result.throughput(elapsed))
                );
                assert!(extract_metrics(&pattern, &log).is_some());
                write_output(&ctx.path().join(run), result.records(), &log)?;
            }
            fs::create_dir_all(ctx.path().join("run_c"))?;

            let report = collect(ctx.path())?;
            let runs: Vec<&str> = report.runs.iter().map(|m| m.run.as_str()).collect();
            assert_eq!(runs, vec!["run_a", "run_b"]);
            assert_eq!(report.missing.len(), 1);

            let times = fs::read_to_string(ctx.path().join("search_times.csv"))?;
            let lines: Vec<&str> = times.lines().collect();
            assert_eq!(lines[0], "Folder,Search Time (seconds)");
            assert_eq!(lines.len(), 3);
            assert!(lines[1].starts_with("run_a,"));
            Ok(())
        },
        cleanup,
    )
}
