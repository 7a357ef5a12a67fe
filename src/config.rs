use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Image encoding used for chart artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    /// Raster output through the bitmap backend
    Png,
    /// Vector output through the SVG backend
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Run configuration, built once at start-up and shared read-only
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// CSV produced by the benchmark harness
    pub input: PathBuf,
    /// Directory receiving the chart artifacts
    pub output_dir: PathBuf,
    /// Encoding for every chart
    pub format: ImageFormat,
}

impl ReportConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        format: ImageFormat,
    ) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            format,
        }
    }

    /// Full path of the artifact for a chart with the given file stem
    pub fn chart_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./docs/benchmark_results.csv"),
            output_dir: PathBuf::from("./docs"),
            format: ImageFormat::Png,
        }
    }
}
