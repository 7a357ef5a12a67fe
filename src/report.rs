use crate::metrics::DerivedMetrics;
use crate::table::BenchmarkTable;
use anyhow::Result;
use std::io::{self, Write};

/// Write the complexity analysis: measured timings followed by step-to-step growth
pub fn write_report<W: Write>(
    out: &mut W,
    table: &BenchmarkTable,
    metrics: &DerivedMetrics,
) -> io::Result<()> {
    writeln!(out, "{:=<80}", "")?;
    writeln!(out, "Suffix Array Complexity Analysis")?;
    writeln!(out, "{:=<80}\n", "")?;

    writeln!(out, "Empirical Results")?;
    writeln!(out, "{:-<80}", "")?;
    writeln!(
        out,
        "  {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Size (n)", "Total (ms)", "SA (ms)", "LCP (ms)", "Search (µs)"
    )?;
    writeln!(out, "  {:-<62}", "")?;
    for (row, search_us) in table
        .rows()
        .iter()
        .zip(metrics.search_time.observed_us.iter())
    {
        writeln!(
            out,
            "  {:>10} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            row.size, row.total_time_ms, row.sa_time_ms, row.lcp_time_ms, search_us
        )?;
    }

    writeln!(out, "\nGrowth Rate Analysis")?;
    writeln!(out, "{:-<80}", "")?;
    let rates = &metrics.growth_rates;
    for (i, size) in rates.sizes.iter().enumerate() {
        // Entry i covers the step from row i to row i + 1
        let prev = table.rows()[i].size;
        writeln!(
            out,
            "  n: {} -> {} ({:.2}x) | Time ratio: {:.2}x | Expected O(n log n): {:.2}x",
            prev, size, rates.size_ratio[i], rates.actual[i], rates.expected[i]
        )?;
    }
    if rates.is_empty() {
        writeln!(out, "  (needs at least two rows)")?;
    }

    writeln!(
        out,
        "\nAverage SA / LCP time ratio: {:.2}",
        metrics.sa_lcp_ratio.mean
    )?;
    writeln!(
        out,
        "Component breakdown: every {} row(s), {} bar(s)",
        metrics.component_breakdown.step,
        metrics.component_breakdown.selected.len()
    )?;
    Ok(())
}

/// Print the complexity analysis to stdout
pub fn print_report(table: &BenchmarkTable, metrics: &DerivedMetrics) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, table, metrics)?;
    out.flush()?;
    Ok(())
}

/// Derived series as pretty JSON. Non-finite values serialize as `null`.
pub fn metrics_json(metrics: &DerivedMetrics) -> Result<String> {
    Ok(serde_json::to_string_pretty(metrics)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::BenchmarkRow;

    fn table() -> BenchmarkTable {
        BenchmarkTable::from_rows(vec![
            BenchmarkRow::new(1000, 1.0, 0.5, 1.5, 2000.0),
            BenchmarkRow::new(2000, 2.2, 1.0, 3.2, 2100.0),
        ])
    }

    #[test]
    fn test_report_lists_rows_and_growth() {
        let table = table();
        let metrics = DerivedMetrics::derive(&table);
        let mut out = Vec::new();

        write_report(&mut out, &table, &metrics).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Suffix Array Complexity Analysis"));
        assert!(text.contains("2.100"));
        assert!(text.contains(
            "n: 1000 -> 2000 (2.00x) | Time ratio: 2.13x | Expected O(n log n): 2.20x"
        ));
        assert!(text.contains("Average SA / LCP time ratio: 2.10"));
    }

    #[test]
    fn test_report_single_row() {
        let table = BenchmarkTable::from_rows(vec![BenchmarkRow::new(10, 0.1, 0.0, 0.1, 50.0)]);
        let metrics = DerivedMetrics::derive(&table);
        let mut out = Vec::new();

        write_report(&mut out, &table, &metrics).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("(needs at least two rows)"));
        assert!(text.contains("Average SA / LCP time ratio: inf"));
    }

    #[test]
    fn test_metrics_json() {
        let table = BenchmarkTable::from_rows(vec![
            BenchmarkRow::new(100, 1.0, 0.0, 1.0, 100.0),
            BenchmarkRow::new(200, 2.0, 1.0, 3.0, 120.0),
        ]);
        let metrics = DerivedMetrics::derive(&table);

        let json = metrics_json(&metrics).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sizes"], serde_json::json!([100, 200]));
        assert_eq!(value["theoretical_total_time"][0], serde_json::json!(1.0));
        assert!(value["sa_lcp_ratio"]["ratios"][0].is_null());
        assert!(value["sa_lcp_ratio"]["mean"].is_null());
        assert_eq!(value["growth_rates"]["actual"], serde_json::json!([3.0]));
        assert_eq!(value["component_breakdown"]["step"], serde_json::json!(1));
    }
}
