use plotly::common::{DashType, Line, Marker, Mode};
use plotly::layout::{AxisType, Legend};
use plotly::{Bar, Plot, Scatter};

use crate::error::{Result, VizError};
use crate::plots::figure::{grid_axis, suptitle, title_margin, FigSize, Grid};
use crate::stats::{DistributionSummary, Histogram};
use crate::table::Table;

/// Options for [`plot_hist_comps`].
#[derive(Debug, Clone, Copy)]
pub struct HistCompsStyle {
    pub y_log: bool,
    pub bins: usize,
}

impl Default for HistCompsStyle {
    fn default() -> Self {
        Self {
            y_log: false,
            bins: 20,
        }
    }
}

/// Display name of a metric column: underscores become spaces, upper case.
pub fn metric_label(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Side-by-side histograms of two metric columns sharing one y scale.
///
/// Each panel marks the mean (solid), the median (dashed) and the central 95%
/// range (dotted).
pub fn plot_hist_comps(
    table: &Table,
    metric_1: &str,
    metric_2: &str,
    style: &HistCompsStyle,
) -> Result<Plot> {
    let metrics = [metric_1, metric_2];
    let labels: Vec<String> = metrics.iter().map(|m| metric_label(m)).collect();

    let mut panels = Vec::with_capacity(2);
    for metric in metrics {
        let values: Vec<f64> = table.column(metric)?.to_vec();
        if values.is_empty() {
            return Err(VizError::EmptyInput("metric column"));
        }
        let hist = Histogram::compute(&values, style.bins)?;
        let summary = DistributionSummary::compute(&values)?;
        panels.push((hist, summary));
    }

    let y_max = panels
        .iter()
        .map(|(h, _)| h.max_count())
        .max()
        .unwrap_or(0) as f64
        * 1.05;
    // a log axis cannot reach zero, so reference lines start at one count
    let y_min = if style.y_log { 1.0 } else { 0.0 };
    if style.y_log && y_max < 1.0 {
        log::warn!("log-scaled histogram has no non-empty bins");
    }

    let grid = Grid::new(1, 2)?.with_top_margin(0.05);
    let mut plot = Plot::new();
    let mut layout = FigSize::new(12.0, 4.0)
        .layout()
        .bar_gap(0.0)
        .margin(title_margin(1))
        .legend(Legend::new().border_color("black").border_width(1));

    for ((cell, (hist, summary)), label) in grid.cells().zip(&panels).zip(&labels) {
        let (xr, yr) = (cell.x_ref(), cell.y_ref());
        let first = cell.index == 0;

        plot.add_trace(
            Bar::new(hist.centers(), hist.counts.clone())
                .marker(Marker::new().color("#1f77b4"))
                .opacity(0.7)
                .show_legend(false)
                .x_axis(&xr)
                .y_axis(&yr),
        );

        let markers = [
            (summary.mean, DashType::Solid, "mean", true),
            (summary.median, DashType::Dash, "median", true),
            (summary.lower_95, DashType::Dot, "95% range", true),
            (summary.upper_95, DashType::Dot, "95% range", false),
        ];
        for (x, dash, name, in_legend) in markers {
            plot.add_trace(
                Scatter::new(vec![x, x], vec![y_min, y_max])
                    .mode(Mode::Lines)
                    .line(Line::new().color("black").dash(dash).width(1.5))
                    .name(name)
                    .legend_group(name)
                    .show_legend(first && in_legend)
                    .x_axis(&xr)
                    .y_axis(&yr),
            );
        }

        let x_axis = grid_axis().title(label.as_str());
        let mut y_axis = grid_axis();
        if style.y_log {
            // log axis ranges are in decades: one count up to the tallest bin
            y_axis = y_axis.type_(AxisType::Log);
            if y_max > 1.0 {
                y_axis = y_axis.range(vec![0.0, y_max.log10()]);
            }
        } else {
            y_axis = y_axis.range(vec![0.0, y_max]);
        }
        if first {
            y_axis = y_axis.title(if style.y_log {
                "frequency (log scale)"
            } else {
                "frequency"
            });
        }
        layout = cell.apply(layout, x_axis, y_axis);
    }

    let title = format!("Projects by {} and {}", labels[0], labels[1]);
    layout = layout.annotations(vec![suptitle(&title, 1.0, 18)]);
    plot.set_layout(layout);
    Ok(plot)
}
