//! Collect command implementation

use anyhow::{Context, Result};
use std::path::Path;

use poidb_cli::collect::{collect, SEARCH_TIMES_FILE, THROUGHPUTS_FILE};

/// Run the collect command
pub fn run(base: String) -> Result<()> {
    let base = Path::new(&base);
    let report =
        collect(base).with_context(|| format!("Failed to collect metrics under {}", base.display()))?;

    for missing in &report.missing {
        println!("{} does not exist", missing.display());
    }
    println!(
        "Collected {} runs into {} and {}",
        report.runs.len(),
        base.join(SEARCH_TIMES_FILE).display(),
        base.join(THROUGHPUTS_FILE).display()
    );
    Ok(())
}
