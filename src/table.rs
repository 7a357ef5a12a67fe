use crate::error::TableError;
use serde::Deserialize;
use std::path::Path;

/// Header names the benchmark harness writes for the columns we consume.
/// Any other columns in the file (nanosecond totals, distinct-substring time, ...) are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Size",
    "Total(ms)",
    "SA(ms)",
    "LCP(ms)",
    "Search(ns)",
    "n*log(n)",
];

/// One measurement row produced by the benchmark harness
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRow {
    /// Input length n
    #[serde(rename = "Size")]
    pub size: u64,
    /// Suffix array construction time
    #[serde(rename = "SA(ms)")]
    pub sa_time_ms: f64,
    /// LCP array construction time
    #[serde(rename = "LCP(ms)")]
    pub lcp_time_ms: f64,
    /// SA + LCP as measured by the harness (not re-checked here)
    #[serde(rename = "Total(ms)")]
    pub total_time_ms: f64,
    /// Single pattern search latency
    #[serde(rename = "Search(ns)")]
    pub search_time_ns: f64,
    /// Precomputed n * log2(n)
    #[serde(rename = "n*log(n)")]
    pub n_log_n: f64,
}

impl BenchmarkRow {
    pub fn new(
        size: u64,
        sa_time_ms: f64,
        lcp_time_ms: f64,
        total_time_ms: f64,
        search_time_ns: f64,
    ) -> Self {
        let n = size as f64;
        Self {
            size,
            sa_time_ms,
            lcp_time_ms,
            total_time_ms,
            search_time_ns,
            n_log_n: n * n.log2(),
        }
    }
}

/// Benchmark measurements ordered by ascending size.
///
/// Rows are trusted as-is: sizes are not checked for ordering or duplicates and
/// totals are not compared against their components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BenchmarkTable {
    rows: Vec<BenchmarkRow>,
}

impl BenchmarkTable {
    pub fn from_rows(rows: Vec<BenchmarkRow>) -> Self {
        Self { rows }
    }

    /// Read the harness CSV at `path`.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        if !path.exists() {
            return Err(TableError::MissingResource(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| TableError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| TableError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TableError::MalformedTable {
                path: path.to_path_buf(),
                missing,
            });
        }

        let rows = reader
            .deserialize::<BenchmarkRow>()
            .collect::<Result<Vec<BenchmarkRow>, _>>()
            .map_err(|source| TableError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(rows = rows.len(), path = %path.display(), "loaded benchmark table");
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[BenchmarkRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&BenchmarkRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&BenchmarkRow> {
        self.rows.last()
    }

    pub fn sizes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.size as f64).collect()
    }

    pub fn total_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total_time_ms).collect()
    }

    pub fn sa_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.sa_time_ms).collect()
    }

    pub fn lcp_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.lcp_time_ms).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HARNESS_HEADER: &str =
        "Size,Total(ns),SA(ns),LCP(ns),Search(ns),Distinct(ns),Total(ms),SA(ms),LCP(ms),n*log(n),n";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_harness_output() {
        let file = write_csv(&[
            HARNESS_HEADER,
            "1000,1500000,1000000,500000,2000,12345,1.500000,1.000000,0.500000,9965.78,1000",
            "2000,3200000,2200000,1000000,2100,23456,3.200000,2.200000,1.000000,21931.57,2000",
        ]);

        let table = BenchmarkTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.size, 1000);
        assert_eq!(first.total_time_ms, 1.5);
        assert_eq!(first.sa_time_ms, 1.0);
        assert_eq!(first.lcp_time_ms, 0.5);
        assert_eq!(first.search_time_ns, 2000.0);
        assert_eq!(first.n_log_n, 9965.78);
        assert_eq!(table.last().unwrap().size, 2000);
    }

    #[test]
    fn test_load_minimal_columns_any_order() {
        let file = write_csv(&[
            "n*log(n),Search(ns),LCP(ms),SA(ms),Total(ms),Size",
            "33.22,150,0.01,0.02,0.03,10",
        ]);

        let table = BenchmarkTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].size, 10);
        assert_eq!(table.rows()[0].search_time_ns, 150.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark_results.csv");

        let err = BenchmarkTable::load(&path).unwrap_err();

        match err {
            TableError::MissingResource(p) => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_columns() {
        let file = write_csv(&["Size,Total(ms),SA(ms)", "10,0.03,0.02"]);

        let err = BenchmarkTable::load(file.path()).unwrap_err();

        match err {
            TableError::MalformedTable { missing, .. } => {
                assert_eq!(missing, vec!["LCP(ms)", "Search(ns)", "n*log(n)"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_header_only_is_empty() {
        let file = write_csv(&[HARNESS_HEADER]);

        let table = BenchmarkTable::load(file.path()).unwrap();

        assert!(table.is_empty());
    }

    #[test]
    fn test_load_non_numeric_row() {
        let file = write_csv(&[
            "Size,Total(ms),SA(ms),LCP(ms),Search(ns),n*log(n)",
            "ten,0.03,0.02,0.01,150,33.22",
        ]);

        let err = BenchmarkTable::load(file.path()).unwrap_err();

        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn test_rows_trusted_as_is() {
        // Descending sizes and an inconsistent total are accepted untouched.
        let file = write_csv(&[
            "Size,Total(ms),SA(ms),LCP(ms),Search(ns),n*log(n)",
            "200,9.0,1.0,1.0,100,1528.77",
            "100,0.5,1.0,1.0,100,664.39",
        ]);

        let table = BenchmarkTable::load(file.path()).unwrap();

        assert_eq!(table.sizes(), vec![200.0, 100.0]);
        assert_eq!(table.total_times(), vec![9.0, 0.5]);
    }

    #[test]
    fn test_row_new_computes_n_log_n() {
        let row = BenchmarkRow::new(1024, 1.0, 0.5, 1.5, 100.0);
        assert_eq!(row.n_log_n, 10240.0);
    }
}
