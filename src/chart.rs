use crate::config::{ImageFormat, ReportConfig};
use crate::metrics::{
    component_breakdown, growth_rates, log_log_reference, sa_lcp_ratio, search_time_curve,
    theoretical_total_time, ComponentBreakdown, GrowthRates, LogLogReference, SaLcpRatio,
    SearchCurve, NO_GROWTH,
};
use crate::table::BenchmarkTable;
use anyhow::{Context, Result};
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::PathBuf;

// Font sizes
const TITLE_FONT_SIZE: u32 = 32;
const PANEL_TITLE_FONT_SIZE: u32 = 26;
const AXIS_LABEL_FONT_SIZE: u32 = 22;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 18;

// Layout tuning
const DEFAULT_MARGIN_BOTTOM: u32 = 40;
const DEFAULT_X_LABEL_AREA_SIZE: u32 = 60;
const DEFAULT_Y_LABEL_AREA_SIZE: u32 = 90;

const MEASURED_STROKE: u32 = 3;
const REFERENCE_STROKE: u32 = 2;
const MARKER_SIZE: u32 = 5;
const DASH_LENGTH: u32 = 12;
const DASH_SPACING: u32 = 8;

/// Color palette
const TOTAL_COLOR: RGBColor = RGBColor(46, 134, 171); // Blue (total / actual)
const SA_COLOR: RGBColor = RGBColor(162, 59, 114); // Magenta (SA construction)
const LCP_COLOR: RGBColor = RGBColor(241, 143, 1); // Orange (LCP construction)
const THEORY_COLOR: RGBColor = RGBColor(199, 62, 29); // Red (theoretical curves)
const LINEAR_COLOR: RGBColor = RGBColor(52, 168, 83); // Green (O(n) reference)
const BASELINE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// One chart artifact: how its series is derived from the table and how it is drawn.
///
/// Implementations are stateless; [`render`] ties a figure to a backend and an
/// output path.
pub trait Figure {
    /// Derived data the figure plots next to the raw table columns
    type Series;

    /// Output file name without extension
    const FILE_STEM: &'static str;

    /// Canvas size in pixels
    const SIZE: (u32, u32) = (1200, 700);

    fn derive(table: &BenchmarkTable) -> Self::Series;

    fn draw<DB: DrawingBackend>(
        table: &BenchmarkTable,
        series: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static;
}

/// Derive the figure's series, draw it and write it under the output directory.
/// An existing file at the same path is overwritten.
pub fn render<F: Figure>(table: &BenchmarkTable, config: &ReportConfig) -> Result<PathBuf> {
    let path = config.chart_path(F::FILE_STEM);
    let series = F::derive(table);

    match config.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(&path, F::SIZE).into_drawing_area();
            F::draw(table, &series, &root)?;
            root.present()?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(&path, F::SIZE).into_drawing_area();
            F::draw(table, &series, &root)?;
            root.present()?;
        }
    }

    println!("Saved: {}", path.display());
    Ok(path)
}

/// File stems of every chart, in generation order
pub const CHART_STEMS: &[&str] = &[
    OverallComplexity::FILE_STEM,
    SaVsLcp::FILE_STEM,
    LogarithmicComplexity::FILE_STEM,
    SearchPerformance::FILE_STEM,
    GrowthRateChart::FILE_STEM,
    ComponentBreakdownChart::FILE_STEM,
];

/// Generate all complexity charts.
///
/// Every chart is attempted even when an earlier one fails; the failures are
/// reported together at the end.
pub fn generate_charts(table: &BenchmarkTable, config: &ReportConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir).context("Failed to create output directory")?;

    let outcomes = [
        (OverallComplexity::FILE_STEM, render::<OverallComplexity>(table, config)),
        (SaVsLcp::FILE_STEM, render::<SaVsLcp>(table, config)),
        (
            LogarithmicComplexity::FILE_STEM,
            render::<LogarithmicComplexity>(table, config),
        ),
        (
            SearchPerformance::FILE_STEM,
            render::<SearchPerformance>(table, config),
        ),
        (GrowthRateChart::FILE_STEM, render::<GrowthRateChart>(table, config)),
        (
            ComponentBreakdownChart::FILE_STEM,
            render::<ComponentBreakdownChart>(table, config),
        ),
    ];

    let mut saved = Vec::new();
    let mut failed = Vec::new();
    for (stem, outcome) in outcomes {
        match outcome {
            Ok(path) => saved.push(path),
            Err(err) => {
                tracing::error!(
                    chart = stem,
                    error = %format!("{err:#}"),
                    "chart generation failed"
                );
                eprintln!("Failed: {}: {:#}", stem, err);
                failed.push(stem);
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Failed to generate chart(s): {}", failed.join(", "));
    }
    Ok(saved)
}

/// Min and max over the finite values, if any
fn finite_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Padded range over the finite values; (0, 1) when there are none
fn linear_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = finite_bounds(values).unwrap_or((0.0, 1.0));
    let span = if max > min { max - min } else { min.abs().max(1.0) };
    (min - span * 0.05)..(max + span * 0.05)
}

/// Range starting at zero for non-negative quantities such as times
fn zero_based_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let max = finite_bounds(values).map(|(_, hi)| hi).unwrap_or(0.0);
    if max > 0.0 {
        0.0..max * 1.1
    } else {
        0.0..1.0
    }
}

/// Range for a log axis over the finite, positive values
fn log_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = finite_bounds(values.into_iter().filter(|&v| v > 0.0)).unwrap_or((1.0, 10.0));
    (min / 2.0)..(max * 2.0)
}

/// Zip x and y, dropping points that cannot be placed on a linear axis
fn finite_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter()
        .copied()
        .zip(ys.iter().copied())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

/// Zip x and y, dropping points that cannot be placed on a log-log axis
fn positive_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    finite_points(xs, ys)
        .into_iter()
        .filter(|(x, y)| *x > 0.0 && *y > 0.0)
        .collect()
}

fn format_size(n: f64) -> String {
    format!("{:.0}", n)
}

fn format_log_tick(value: f64) -> String {
    if value <= 0.0 {
        return String::new();
    }
    // Only label powers of 10 on log axes.
    let log10 = value.log10();
    let nearest = log10.round();
    if (log10 - nearest).abs() < 1e-6 {
        if value >= 1.0 {
            format!("{:.0}", value)
        } else {
            format!("{}", value)
        }
    } else {
        String::new()
    }
}

/// Solid line with circle markers for a measured series
fn draw_measured<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    points: &[(f64, f64)],
    color: RGBColor,
    label: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let anno = if points.len() > 1 {
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(MEASURED_STROKE),
        ))?
    } else {
        chart.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
    };
    anno.label(label)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(MEASURED_STROKE))
        });

    chart.draw_series(PointSeries::of_element(
        points.iter().copied(),
        MARKER_SIZE,
        color.filled(),
        &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
    ))?;
    Ok(())
}

/// Dashed line for a theoretical or reference series
fn draw_reference<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    points: &[(f64, f64)],
    color: RGBColor,
    label: &str,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let style = color.mix(0.7).stroke_width(REFERENCE_STROKE);
    // Fewer than two points still get a legend entry.
    let anno = if points.len() > 1 {
        chart.draw_series(DashedLineSeries::new(
            points.iter().copied(),
            DASH_LENGTH,
            DASH_SPACING,
            style,
        ))?
    } else {
        chart.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
    };
    anno.label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    Ok(())
}

fn draw_legend<'a, DB, CT>(chart: &mut ChartContext<'a, DB, CT>) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    CT: CoordTranslate,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()?;
    Ok(())
}

/// Total, SA and LCP time against the anchored n log n curve
pub struct OverallComplexity;

impl Figure for OverallComplexity {
    type Series = Vec<f64>;
    const FILE_STEM: &'static str = "overall_complexity";

    fn derive(table: &BenchmarkTable) -> Self::Series {
        theoretical_total_time(table)
    }

    fn draw<DB: DrawingBackend>(
        table: &BenchmarkTable,
        theoretical: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let sizes = table.sizes();
        let total = table.total_times();
        let y_range = zero_based_range(
            total
                .iter()
                .chain(table.sa_times().iter())
                .chain(table.lcp_times().iter())
                .chain(theoretical.iter())
                .copied()
                .collect::<Vec<_>>(),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Suffix Array: Overall Time Complexity Analysis",
                ("sans-serif", TITLE_FONT_SIZE),
            )
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(linear_range(sizes.iter().copied()), y_range)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| format_size(*x))
            .x_desc("Input Size (n)")
            .y_desc("Time (milliseconds)")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        draw_measured(
            &mut chart,
            &finite_points(&sizes, &total),
            TOTAL_COLOR,
            "Actual Total Time",
        )?;
        draw_measured(
            &mut chart,
            &finite_points(&sizes, &table.sa_times()),
            SA_COLOR,
            "SA Construction",
        )?;
        draw_measured(
            &mut chart,
            &finite_points(&sizes, &table.lcp_times()),
            LCP_COLOR,
            "LCP Construction",
        )?;
        draw_reference(
            &mut chart,
            &finite_points(&sizes, theoretical),
            THEORY_COLOR,
            "O(n log n) theoretical",
        )?;

        draw_legend(&mut chart)
    }
}

/// SA and LCP construction side by side, plus their ratio
pub struct SaVsLcp;

impl Figure for SaVsLcp {
    type Series = SaLcpRatio;
    const FILE_STEM: &'static str = "sa_vs_lcp";
    const SIZE: (u32, u32) = (1600, 600);

    fn derive(table: &BenchmarkTable) -> Self::Series {
        sa_lcp_ratio(table)
    }

    fn draw<DB: DrawingBackend>(
        table: &BenchmarkTable,
        ratio: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;
        let panels = root.split_evenly((1, 2));
        let sizes = table.sizes();
        let sa = table.sa_times();
        let lcp = table.lcp_times();
        let x_range = linear_range(sizes.iter().copied());

        // Left: construction times
        let mut times = ChartBuilder::on(&panels[0])
            .caption("SA vs LCP Construction Time", ("sans-serif", PANEL_TITLE_FONT_SIZE))
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(
                x_range.clone(),
                zero_based_range(sa.iter().chain(lcp.iter()).copied().collect::<Vec<_>>()),
            )?;

        times
            .configure_mesh()
            .x_label_formatter(&|x| format_size(*x))
            .x_desc("Input Size (n)")
            .y_desc("Time (milliseconds)")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        draw_measured(
            &mut times,
            &finite_points(&sizes, &sa),
            TOTAL_COLOR,
            "SA Construction O(n log n)",
        )?;
        draw_measured(
            &mut times,
            &finite_points(&sizes, &lcp),
            LCP_COLOR,
            "LCP Construction O(n)",
        )?;
        draw_legend(&mut times)?;

        // Right: SA / LCP ratio with its mean
        let mut ratio_values = ratio.ratios.clone();
        ratio_values.push(ratio.mean);
        let mut ratios = ChartBuilder::on(&panels[1])
            .caption("SA to LCP Time Ratio", ("sans-serif", PANEL_TITLE_FONT_SIZE))
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(x_range.clone(), linear_range(ratio_values))?;

        ratios
            .configure_mesh()
            .x_label_formatter(&|x| format_size(*x))
            .x_desc("Input Size (n)")
            .y_desc("Time Ratio (SA / LCP)")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        draw_measured(
            &mut ratios,
            &finite_points(&sizes, &ratio.ratios),
            SA_COLOR,
            "SA / LCP",
        )?;

        let mean_line = if ratio.mean.is_finite() {
            vec![(x_range.start, ratio.mean), (x_range.end, ratio.mean)]
        } else {
            Vec::new()
        };
        draw_reference(
            &mut ratios,
            &mean_line,
            THEORY_COLOR,
            &format!("Average Ratio: {:.2}", ratio.mean),
        )?;

        draw_legend(&mut ratios)
    }
}

/// Log-log view of the timings with O(n) and O(n log n) reference lines
pub struct LogarithmicComplexity;

impl Figure for LogarithmicComplexity {
    type Series = LogLogReference;
    const FILE_STEM: &'static str = "logarithmic_complexity";

    fn derive(table: &BenchmarkTable) -> Self::Series {
        log_log_reference(table)
    }

    fn draw<DB: DrawingBackend>(
        table: &BenchmarkTable,
        reference: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let sizes = table.sizes();
        let total = table.total_times();
        let sa = table.sa_times();
        let lcp = table.lcp_times();
        let y_values: Vec<f64> = total
            .iter()
            .chain(sa.iter())
            .chain(lcp.iter())
            .chain(reference.linear.iter())
            .chain(reference.n_log_n.iter())
            .copied()
            .collect();

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Suffix Array: Logarithmic Complexity Analysis",
                ("sans-serif", TITLE_FONT_SIZE),
            )
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(
                log_range(sizes.iter().copied()).log_scale(),
                log_range(y_values).log_scale(),
            )?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| format_log_tick(*x))
            .y_label_formatter(&|y| format_log_tick(*y))
            .x_desc("Input Size (n) - Log Scale")
            .y_desc("Time (ms) - Log Scale")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        draw_measured(
            &mut chart,
            &positive_points(&sizes, &total),
            TOTAL_COLOR,
            "Actual Total Time",
        )?;
        draw_measured(&mut chart, &positive_points(&sizes, &sa), SA_COLOR, "SA Construction")?;
        draw_measured(&mut chart, &positive_points(&sizes, &lcp), LCP_COLOR, "LCP Construction")?;
        draw_reference(
            &mut chart,
            &positive_points(&sizes, &reference.linear),
            LINEAR_COLOR,
            "O(n)",
        )?;
        draw_reference(
            &mut chart,
            &positive_points(&sizes, &reference.n_log_n),
            THEORY_COLOR,
            "O(n log n)",
        )?;

        draw_legend(&mut chart)
    }
}

/// Search latency against a log n curve anchored to the largest input
pub struct SearchPerformance;

impl Figure for SearchPerformance {
    type Series = SearchCurve;
    const FILE_STEM: &'static str = "search_performance";

    fn derive(table: &BenchmarkTable) -> Self::Series {
        search_time_curve(table)
    }

    fn draw<DB: DrawingBackend>(
        table: &BenchmarkTable,
        curve: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let sizes = table.sizes();
        let y_range = zero_based_range(
            curve
                .observed_us
                .iter()
                .chain(curve.theoretical_us.iter())
                .copied()
                .collect::<Vec<_>>(),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Binary Search Performance: O(log n) Pattern Matching",
                ("sans-serif", TITLE_FONT_SIZE),
            )
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(linear_range(sizes.iter().copied()), y_range)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| format_size(*x))
            .x_desc("Input Size (n)")
            .y_desc("Search Time (microseconds)")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        draw_measured(
            &mut chart,
            &finite_points(&sizes, &curve.observed_us),
            TOTAL_COLOR,
            "Actual Search Time",
        )?;
        draw_reference(
            &mut chart,
            &finite_points(&sizes, &curve.theoretical_us),
            THEORY_COLOR,
            "O(log n) theoretical",
        )?;

        draw_legend(&mut chart)
    }
}

/// Step-to-step growth of total time against the n log n expectation
pub struct GrowthRateChart;

impl Figure for GrowthRateChart {
    type Series = GrowthRates;
    const FILE_STEM: &'static str = "growth_rates";

    fn derive(table: &BenchmarkTable) -> Self::Series {
        growth_rates(table)
    }

    fn draw<DB: DrawingBackend>(
        _table: &BenchmarkTable,
        rates: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let sizes: Vec<f64> = rates.sizes.iter().map(|&n| n as f64).collect();
        let mut y_values: Vec<f64> = rates
            .actual
            .iter()
            .chain(rates.expected.iter())
            .copied()
            .collect();
        y_values.push(NO_GROWTH);
        let x_range = linear_range(sizes.iter().copied());

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Empirical vs Theoretical Growth Rate Analysis",
                ("sans-serif", TITLE_FONT_SIZE),
            )
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(x_range.clone(), zero_based_range(y_values))?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| format_size(*x))
            .x_desc("Input Size (n)")
            .y_desc("Growth Rate Factor")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        // No-growth baseline
        chart.draw_series(LineSeries::new(
            vec![(x_range.start, NO_GROWTH), (x_range.end, NO_GROWTH)],
            BASELINE_COLOR.mix(0.5).stroke_width(1),
        ))?;

        draw_measured(
            &mut chart,
            &finite_points(&sizes, &rates.actual),
            TOTAL_COLOR,
            "Actual Growth Rate",
        )?;

        let expected = finite_points(&sizes, &rates.expected);
        draw_reference(&mut chart, &expected, THEORY_COLOR, "Expected O(n log n) Growth")?;
        chart.draw_series(expected.iter().map(|&(x, y)| {
            EmptyElement::at((x, y))
                + Rectangle::new([(-4, -4), (4, 4)], THEORY_COLOR.mix(0.7).filled())
        }))?;

        draw_legend(&mut chart)
    }
}

/// Stacked SA + LCP bars over a thinned subset of sizes
pub struct ComponentBreakdownChart;

impl Figure for ComponentBreakdownChart {
    type Series = ComponentBreakdown;
    const FILE_STEM: &'static str = "component_breakdown";
    const SIZE: (u32, u32) = (1400, 700);

    fn derive(table: &BenchmarkTable) -> Self::Series {
        component_breakdown(table)
    }

    fn draw<DB: DrawingBackend>(
        table: &BenchmarkTable,
        breakdown: &Self::Series,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let bars: Vec<(u64, f64, f64)> = breakdown.bars(table).collect();
        let num_bars = bars.len().max(1);
        let labels: Vec<String> = bars.iter().map(|(size, _, _)| size.to_string()).collect();
        let y_range = zero_based_range(bars.iter().map(|&(_, _, top)| top).collect::<Vec<_>>());

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Time Component Breakdown: SA vs LCP",
                ("sans-serif", TITLE_FONT_SIZE),
            )
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(-0.5..(num_bars as f64 - 0.5), y_range.clone())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(num_bars)
            .x_label_formatter(&|x| {
                let idx = x.round() as usize;
                if (x - idx as f64).abs() < 0.3 {
                    labels.get(idx).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_desc("Input Size (n)")
            .y_desc("Time (milliseconds)")
            .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
            .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;

        let bar_width = 0.6;
        for (idx, &(_, base, top)) in bars.iter().enumerate() {
            if !base.is_finite() || !top.is_finite() {
                continue;
            }
            let x_left = idx as f64 - bar_width / 2.0;
            let x_right = idx as f64 + bar_width / 2.0;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x_left, 0.0), (x_right, base)],
                TOTAL_COLOR.mix(0.8).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x_left, base), (x_right, top)],
                LCP_COLOR.mix(0.8).filled(),
            )))?;
        }

        // Legend entries
        for (name, color) in [("SA Construction", TOTAL_COLOR), ("LCP Construction", LCP_COLOR)] {
            chart
                .draw_series(std::iter::once(Circle::new(
                    (0.0, y_range.start),
                    0,
                    color.filled(),
                )))?
                .label(name)
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.8).filled())
                });
        }

        draw_legend(&mut chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_stems_in_generation_order() {
        assert_eq!(
            CHART_STEMS,
            &[
                "overall_complexity",
                "sa_vs_lcp",
                "logarithmic_complexity",
                "search_performance",
                "growth_rates",
                "component_breakdown",
            ]
        );
    }

    #[test]
    fn test_finite_bounds_skips_non_finite() {
        assert_eq!(
            finite_bounds([3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]),
            Some((-1.0, 3.0))
        );
        assert_eq!(finite_bounds([f64::NAN, f64::NEG_INFINITY]), None);
        assert_eq!(finite_bounds(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_linear_range_pads_and_falls_back() {
        let range = linear_range([0.0, 100.0]);
        assert_eq!(range, -5.0..105.0);

        let fallback = linear_range([f64::NAN]);
        assert!(fallback.start < 0.0 && fallback.end > 1.0);

        // A single value still yields a non-empty range
        let single = linear_range([1000.0]);
        assert!(single.start < 1000.0 && single.end > 1000.0);
    }

    #[test]
    fn test_zero_based_range() {
        assert_eq!(zero_based_range([2.0, 10.0]).start, 0.0);
        assert!((zero_based_range([2.0, 10.0]).end - 11.0).abs() < 1e-9);
        assert_eq!(zero_based_range([f64::INFINITY]), 0.0..1.0);
        assert_eq!(zero_based_range([0.0]), 0.0..1.0);
    }

    #[test]
    fn test_log_range_ignores_non_positive() {
        assert_eq!(log_range([0.0, -3.0, 4.0, 16.0]), 2.0..32.0);
        assert_eq!(log_range([0.0]), 0.5..20.0);
    }

    #[test]
    fn test_points_filtering() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [f64::INFINITY, 0.0, f64::NAN, 5.0];

        assert_eq!(finite_points(&xs, &ys), vec![(2.0, 0.0), (4.0, 5.0)]);
        assert_eq!(positive_points(&xs, &ys), vec![(4.0, 5.0)]);
    }

    #[test]
    fn test_format_log_tick() {
        assert_eq!(format_log_tick(1000.0), "1000");
        assert_eq!(format_log_tick(0.01), "0.01");
        assert_eq!(format_log_tick(250.0), "");
        assert_eq!(format_log_tick(0.0), "");
    }
}
