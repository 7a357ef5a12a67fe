//! Derived series comparing measured timings with theoretical growth curves.
//!
//! Every function here is a pure function of the [`BenchmarkTable`]. Division by
//! zero and logarithms of sizes <= 1 are not special-cased: the resulting
//! infinities and NaNs flow into the series unchanged.

use crate::table::BenchmarkTable;
use serde::Serialize;

/// Horizontal reference for growth-rate charts: a ratio of 1.0 means no growth.
pub const NO_GROWTH: f64 = 1.0;

/// Rows kept in the component breakdown are roughly this many.
const BREAKDOWN_TARGET_BARS: usize = 10;

fn warn_non_finite(series: &str, values: &[f64]) {
    let count = values.iter().filter(|v| !v.is_finite()).count();
    if count > 0 {
        tracing::warn!(series, count, "non-finite values in derived series");
    }
}

/// n log n curve scaled so its first point equals the first observed total time.
///
/// Uses the harness's precomputed `n*log(n)` column. A zero first reference
/// value makes every point non-finite.
pub fn theoretical_total_time(table: &BenchmarkTable) -> Vec<f64> {
    let Some(first) = table.first() else {
        return Vec::new();
    };

    let curve: Vec<f64> = table
        .rows()
        .iter()
        .map(|r| (r.n_log_n / first.n_log_n) * first.total_time_ms)
        .collect();
    warn_non_finite("theoretical_total_time", &curve);
    curve
}

/// Per-row SA/LCP time ratio and its arithmetic mean
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaLcpRatio {
    pub ratios: Vec<f64>,
    /// Mean over every ratio, non-finite ones included
    pub mean: f64,
}

pub fn sa_lcp_ratio(table: &BenchmarkTable) -> SaLcpRatio {
    let ratios: Vec<f64> = table
        .rows()
        .iter()
        .map(|r| r.sa_time_ms / r.lcp_time_ms)
        .collect();
    let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
    warn_non_finite("sa_lcp_ratio", &ratios);

    SaLcpRatio { ratios, mean }
}

/// O(n) and O(n log n) reference lines for the log-log chart, both anchored to
/// the first observed total time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLogReference {
    pub linear: Vec<f64>,
    pub n_log_n: Vec<f64>,
}

pub fn log_log_reference(table: &BenchmarkTable) -> LogLogReference {
    let Some(first) = table.first() else {
        return LogLogReference {
            linear: Vec::new(),
            n_log_n: Vec::new(),
        };
    };

    let size0 = first.size as f64;
    let total0 = first.total_time_ms;
    let nlogn0 = size0 * size0.log2();

    let sizes = table.sizes();
    let linear: Vec<f64> = sizes.iter().map(|&n| (n / size0) * total0).collect();
    let n_log_n: Vec<f64> = sizes
        .iter()
        .map(|&n| (n * n.log2() / nlogn0) * total0)
        .collect();

    if first.size <= 1 {
        tracing::warn!(size = first.size, "first size <= 1, n log n reference is undefined");
    }
    warn_non_finite("log_log_reference.linear", &linear);
    warn_non_finite("log_log_reference.n_log_n", &n_log_n);

    LogLogReference { linear, n_log_n }
}

/// Observed search latency in microseconds and the log n curve anchored to
/// the last observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCurve {
    pub observed_us: Vec<f64>,
    pub theoretical_us: Vec<f64>,
}

pub fn search_time_curve(table: &BenchmarkTable) -> SearchCurve {
    let observed_us: Vec<f64> = table
        .rows()
        .iter()
        .map(|r| r.search_time_ns / 1000.0)
        .collect();

    let Some(last) = table.last() else {
        return SearchCurve {
            observed_us,
            theoretical_us: Vec::new(),
        };
    };

    let last_us = last.search_time_ns / 1000.0;
    let last_log = (last.size as f64).log2();
    let theoretical_us: Vec<f64> = table
        .sizes()
        .iter()
        .map(|&n| (n.log2() / last_log) * last_us)
        .collect();
    warn_non_finite("search_time_curve", &theoretical_us);

    SearchCurve {
        observed_us,
        theoretical_us,
    }
}

/// Step-to-step growth of total time against the n log n expectation.
///
/// Entry `i` describes the transition from row `i` to row `i + 1` of the table
/// and is plotted at `sizes[i]`, the larger of the two sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRates {
    pub sizes: Vec<u64>,
    pub size_ratio: Vec<f64>,
    pub actual: Vec<f64>,
    pub expected: Vec<f64>,
}

impl GrowthRates {
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }
}

pub fn growth_rates(table: &BenchmarkTable) -> GrowthRates {
    let rows = table.rows();
    let steps = rows.len().saturating_sub(1);

    let mut rates = GrowthRates {
        sizes: Vec::with_capacity(steps),
        size_ratio: Vec::with_capacity(steps),
        actual: Vec::with_capacity(steps),
        expected: Vec::with_capacity(steps),
    };

    for pair in rows.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let n1 = prev.size as f64;
        let n2 = curr.size as f64;

        rates.sizes.push(curr.size);
        rates.size_ratio.push(n2 / n1);
        rates.actual.push(curr.total_time_ms / prev.total_time_ms);
        rates.expected.push((n2 * n2.log2()) / (n1 * n1.log2()));
    }

    warn_non_finite("growth_rates.actual", &rates.actual);
    warn_non_finite("growth_rates.expected", &rates.expected);
    rates
}

/// Stacked SA + LCP bars over a thinned subset of rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentBreakdown {
    /// Every `step`-th row is shown
    pub step: usize,
    /// Row indices shown as bars
    pub selected: Vec<usize>,
    /// Bottom segment (SA time) for every row
    pub base: Vec<f64>,
    /// Top of the stacked LCP segment (SA + LCP) for every row
    pub top: Vec<f64>,
}

impl ComponentBreakdown {
    /// `(size, base, top)` for each selected row
    pub fn bars<'a>(
        &'a self,
        table: &'a BenchmarkTable,
    ) -> impl Iterator<Item = (u64, f64, f64)> + 'a {
        self.selected
            .iter()
            .map(move |&i| (table.rows()[i].size, self.base[i], self.top[i]))
    }
}

/// Every `max(1, N / 10)`-th row is drawn, so a single-row table yields one bar.
pub fn component_breakdown(table: &BenchmarkTable) -> ComponentBreakdown {
    let step = (table.len() / BREAKDOWN_TARGET_BARS).max(1);
    let selected: Vec<usize> = (0..table.len()).step_by(step).collect();
    let base = table.sa_times();
    let top: Vec<f64> = table
        .rows()
        .iter()
        .map(|r| r.sa_time_ms + r.lcp_time_ms)
        .collect();

    tracing::debug!(step, bars = selected.len(), "component breakdown subset");
    ComponentBreakdown {
        step,
        selected,
        base,
        top,
    }
}

/// All derived series for one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub sizes: Vec<u64>,
    pub theoretical_total_time: Vec<f64>,
    pub sa_lcp_ratio: SaLcpRatio,
    pub log_log_reference: LogLogReference,
    pub search_time: SearchCurve,
    pub growth_rates: GrowthRates,
    pub component_breakdown: ComponentBreakdown,
}

impl DerivedMetrics {
    pub fn derive(table: &BenchmarkTable) -> Self {
        Self {
            sizes: table.rows().iter().map(|r| r.size).collect(),
            theoretical_total_time: theoretical_total_time(table),
            sa_lcp_ratio: sa_lcp_ratio(table),
            log_log_reference: log_log_reference(table),
            search_time: search_time_curve(table),
            growth_rates: growth_rates(table),
            component_breakdown: component_breakdown(table),
        }
    }
}
