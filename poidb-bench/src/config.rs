//! Benchmark configuration

/// Configuration for benchmark runs
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Record counts to benchmark
    pub poi_counts: Vec<usize>,
    /// Side of the square area records are scattered over, in degrees
    pub area_degrees: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            poi_counts: vec![1_000, 10_000, 100_000],
            area_degrees: 1.0,
        }
    }
}

impl BenchmarkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick config with smaller record counts for fast testing
    pub fn quick() -> Self {
        Self {
            poi_counts: vec![100, 1_000],
            ..Default::default()
        }
    }
}
