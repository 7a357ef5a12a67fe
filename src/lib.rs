pub mod chart;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod table;

pub use config::{ImageFormat, ReportConfig};
pub use error::TableError;
pub use metrics::DerivedMetrics;
pub use table::{BenchmarkRow, BenchmarkTable};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Load the benchmark table named by `config`.
///
/// An empty table is rejected here: there is no first or last observation to
/// anchor the theoretical curves to.
pub fn load_table(config: &ReportConfig) -> Result<BenchmarkTable> {
    let table = BenchmarkTable::load(config.input())?;
    if table.is_empty() {
        anyhow::bail!(
            "benchmark table {} has no rows",
            config.input().display()
        );
    }
    Ok(table)
}

/// Load the table and write every chart. Nothing is written when loading fails.
pub fn run(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    println!("Loading benchmark data...");
    let table = load_table(config)?;
    tracing::debug!(rows = table.len(), "benchmark table ready");

    println!("\nGenerating plots...");
    chart::generate_charts(&table, config)
        .with_context(|| format!("Failed to write charts to {}", config.output_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("charts");
        let config = ReportConfig::new(
            dir.path().join("missing.csv"),
            &output_dir,
            ImageFormat::Png,
        );

        let err = run(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MissingResource(_))
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_run_malformed_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("benchmark_results.csv");
        std::fs::write(&input, "Size,Total(ms)\n10,0.5\n").unwrap();
        let output_dir = dir.path().join("charts");
        let config = ReportConfig::new(&input, &output_dir, ImageFormat::Svg);

        let err = run(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TableError>(),
            Some(TableError::MalformedTable { .. })
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_load_table_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("benchmark_results.csv");
        std::fs::write(&input, "Size,Total(ms),SA(ms),LCP(ms),Search(ns),n*log(n)\n").unwrap();
        let config = ReportConfig::new(&input, dir.path(), ImageFormat::Png);

        let err = load_table(&config).unwrap_err();

        assert!(err.to_string().contains("has no rows"));
    }

    const HEADER: &str = "Size,Total(ms),SA(ms),LCP(ms),Search(ns),n*log(n)";

    #[test]
    fn test_run_writes_every_chart_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("benchmark_results.csv");
        std::fs::write(
            &input,
            format!(
                "{HEADER}\n\
                 1000,1.5,1.0,0.5,2000,9965.78\n\
                 2000,3.2,2.2,1.0,2100,21931.57\n\
                 4000,7.0,4.8,2.2,2300,47863.14\n"
            ),
        )
        .unwrap();
        let output_dir = dir.path().join("charts");
        let config = ReportConfig::new(&input, &output_dir, ImageFormat::Svg);

        let saved = run(&config).unwrap();

        assert_eq!(saved.len(), chart::CHART_STEMS.len());
        for stem in chart::CHART_STEMS {
            let path = config.chart_path(stem);
            assert!(saved.contains(&path), "{} not reported", path.display());
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }

        for stem in chart::CHART_STEMS {
            std::fs::write(config.chart_path(stem), b"stale").unwrap();
        }
        run(&config).unwrap();
        for stem in chart::CHART_STEMS {
            let content = std::fs::read(config.chart_path(stem)).unwrap();
            assert_ne!(content, b"stale".to_vec(), "{stem} was not overwritten");
        }
    }

    #[test]
    fn test_run_single_row_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("benchmark_results.csv");
        std::fs::write(&input, format!("{HEADER}\n1000,1.5,1.0,0.5,2000,9965.78\n")).unwrap();
        let config = ReportConfig::new(&input, dir.path().join("charts"), ImageFormat::Svg);

        let saved = run(&config).unwrap();

        assert_eq!(saved.len(), chart::CHART_STEMS.len());
        for stem in chart::CHART_STEMS {
            assert!(config.chart_path(stem).exists());
        }
    }

    #[test]
    fn test_generate_charts_with_non_finite_series() {
        // size 1 makes log2(n) zero; zero lcp and search times give inf/NaN ratios
        let table = BenchmarkTable::from_rows(vec![
            BenchmarkRow::new(1, 0.0, 0.0, 0.0, 0.0),
            BenchmarkRow::new(10, 0.1, 0.0, 0.1, 0.0),
            BenchmarkRow::new(100, 1.2, 0.0, 1.2, 35.0),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::new("unused.csv", dir.path(), ImageFormat::Svg);

        let saved = chart::generate_charts(&table, &config).unwrap();

        assert_eq!(saved.len(), chart::CHART_STEMS.len());
        for stem in chart::CHART_STEMS {
            assert!(config.chart_path(stem).exists());
        }
    }
}
