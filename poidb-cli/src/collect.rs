//! Benchmark collection over many query runs.
//!
//! Each immediate sub-directory of a base directory is one run holding the
//! `log.txt` written by a query. The search time and throughput lines are
//! extracted and tabulated into `search_times.csv` and `throughputs.csv` in
//! the base directory, one row per run in directory-name order.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use poidb::errors::{ErrorKind, PoiError, PoiResult};

use crate::output::LOG_FILE;

pub const SEARCH_TIMES_FILE: &str = "search_times.csv";
pub const THROUGHPUTS_FILE: &str = "throughputs.csv";

const METRICS_PATTERN: &str =
    r"search time ([0-9.eE+-]+) s, throughput ([0-9.eE+-]+|inf|NaN) records/s";

/// Metrics of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    pub run: String,
    pub search_time_secs: f64,
    pub throughput: f64,
}

/// What a collection pass found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectReport {
    pub runs: Vec<RunMetrics>,
    /// Run directories without a readable metrics line.
    pub missing: Vec<PathBuf>,
}

/// Formats the metrics line appended to a query log.
pub fn metrics_line(search_time_secs: f64, throughput: f64) -> String {
    format!(
        "search time {} s, throughput {} records/s",
        search_time_secs, throughput
    )
}

/// Compiles the pattern matching [`metrics_line`] output.
pub fn metrics_pattern() -> PoiResult<Regex> {
    Regex::new(METRICS_PATTERN).map_err(|e| {
        PoiError::new(
            &format!("Invalid metrics pattern: {}", e),
            ErrorKind::InternalError,
        )
    })
}

/// Extracts `(search time, throughput)` from a query log.
pub fn extract_metrics(pattern: &Regex, log: &str) -> Option<(f64, f64)> {
    let captures = pattern.captures(log)?;
    let search_time = captures.get(1)?.as_str().parse().ok()?;
    let throughput = captures.get(2)?.as_str().parse().ok()?;
    Some((search_time, throughput))
}

/// Scans the run directories under `base` and writes the two summary files.
///
/// # Errors
///
/// `FileNotFound` if `base` does not exist, `IOError` on read or write
/// failures.
pub fn collect(base: &Path) -> PoiResult<CollectReport> {
    if !base.is_dir() {
        log::error!("Base directory {} does not exist", base.display());
        return Err(PoiError::new(
            &format!("Base directory {} does not exist", base.display()),
            ErrorKind::FileNotFound,
        ));
    }

    let mut run_dirs = Vec::new();
    for entry in fs::read_dir(base)? {
        let path = entry?.path();
        if path.is_dir() {
            run_dirs.push(path);
        }
    }
    run_dirs.sort();

    let pattern = metrics_pattern()?;
    let mut report = CollectReport::default();
    for dir in run_dirs {
        let log_path = dir.join(LOG_FILE);
        let metrics = fs::read_to_string(&log_path)
            .ok()
            .and_then(|log| extract_metrics(&pattern, &log));
        match metrics {
            Some((search_time_secs, throughput)) => report.runs.push(RunMetrics {
                run: dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                search_time_secs,
                throughput,
            }),
            None => {
                log::warn!("{} does not exist or holds no metrics", log_path.display());
                report.missing.push(log_path);
            }
        }
    }

    write_table(
        &base.join(SEARCH_TIMES_FILE),
        "Search Time (seconds)",
        report.runs.iter().map(|m| (m.run.as_str(), m.search_time_secs)),
    )?;
    write_table(
        &base.join(THROUGHPUTS_FILE),
        "Throughput (records/second)",
        report.runs.iter().map(|m| (m.run.as_str(), m.throughput)),
    )?;
    Ok(report)
}

fn write_table<'a, I>(path: &Path, column: &str, rows: I) -> PoiResult<()>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut writer = csv::Writer::from_path(path).map_err(table_error)?;
    writer.write_record(["Folder", column]).map_err(table_error)?;
    for (run, value) in rows {
        writer
            .write_record([run, value.to_string().as_str()])
            .map_err(table_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn table_error(err: csv::Error) -> PoiError {
    PoiError::new(&format!("Failed to write summary: {}", err), ErrorKind::IOError)
}
