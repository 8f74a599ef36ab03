use plotly::common::{Anchor, Font, Marker, Orientation};
use plotly::layout::{Annotation, Axis};
use plotly::{Bar, Plot};

use crate::error::{Result, VizError};
use crate::plots::figure::{css_color, grid_axis, FigSize};
use crate::stats::format_thousands;
use crate::table::ValueCounts;

/// Options for [`plot_value_counts`].
#[derive(Debug, Clone)]
pub struct ValueCountsStyle {
    pub figsize: FigSize,
    pub color: String,
}

impl Default for ValueCountsStyle {
    fn default() -> Self {
        Self {
            figsize: FigSize::new(9.0, 3.0),
            color: "tab:blue".to_string(),
        }
    }
}

/// Vertical bar chart of category counts, each bar labelled with its count.
pub fn plot_value_counts(value_counts: &ValueCounts, style: &ValueCountsStyle) -> Result<Plot> {
    let max_y = value_counts
        .max_count()
        .ok_or(VizError::EmptyInput("value counts"))? as f64;
    let positions: Vec<f64> = (0..value_counts.len()).map(|i| i as f64).collect();
    let counts = value_counts.counts();

    let bars = Bar::new(positions.clone(), counts.clone())
        .marker(Marker::new().color(css_color(&style.color)))
        .opacity(0.5)
        .show_legend(false);

    let labels = positions
        .iter()
        .zip(&counts)
        .map(|(&x, &y)| {
            Annotation::new()
                .text(&format_thousands(y as i64))
                .x(x)
                .y(y as f64 + max_y * 0.02)
                .x_anchor(Anchor::Center)
                .y_anchor(Anchor::Bottom)
                .show_arrow(false)
                .font(Font::new().size(14).color("black"))
        })
        .collect();

    let layout = style
        .figsize
        .layout()
        .x_axis(
            Axis::new()
                .tick_values(positions)
                .tick_text(value_counts.labels())
                .tick_font(Font::new().size(14)),
        )
        .y_axis(grid_axis())
        .annotations(labels);

    let mut plot = Plot::new();
    plot.add_trace(bars);
    plot.set_layout(layout);
    Ok(plot)
}

/// Options for [`plot_barplot`].
#[derive(Debug, Clone)]
pub struct BarplotStyle {
    /// Figure height in inches; the width is fixed at 12.
    pub height: f64,
    /// y-axis title, omitted when `None`.
    pub varname: Option<String>,
    pub color: String,
    /// Gap between a bar's end and its count label, as a fraction of the longest bar.
    pub label_space: f64,
}

impl Default for BarplotStyle {
    fn default() -> Self {
        Self {
            height: 6.0,
            varname: None,
            color: "k".to_string(),
            label_space: 0.01,
        }
    }
}

/// Horizontal bar chart of category counts with count labels right of each bar.
pub fn plot_barplot(value_counts: &ValueCounts, title: &str, style: &BarplotStyle) -> Result<Plot> {
    let max_y = value_counts
        .max_count()
        .ok_or(VizError::EmptyInput("value counts"))? as f64;
    let positions: Vec<f64> = (0..value_counts.len()).map(|i| i as f64).collect();
    let counts = value_counts.counts();

    let bars = Bar::new(counts.clone(), positions.clone())
        .orientation(Orientation::Horizontal)
        .marker(Marker::new().color(css_color(&style.color)))
        .opacity(1.0)
        .show_legend(false);

    let labels = positions
        .iter()
        .zip(&counts)
        .map(|(&pos, &count)| {
            Annotation::new()
                .text(&format_thousands(count as i64))
                .x(count as f64 + max_y * style.label_space)
                .y(pos)
                .x_anchor(Anchor::Left)
                .y_anchor(Anchor::Middle)
                .show_arrow(false)
                .font(Font::new().size(12).color("black"))
        })
        .collect();

    let mut y_axis = grid_axis()
        .tick_values(positions)
        .tick_text(value_counts.labels())
        .tick_font(Font::new().size(12));
    if let Some(varname) = &style.varname {
        y_axis = y_axis.title(varname.as_str());
    }

    let layout = FigSize::new(12.0, style.height)
        .layout()
        .title(title)
        .x_axis(grid_axis().title("count"))
        .y_axis(y_axis)
        .annotations(labels);

    let mut plot = Plot::new();
    plot.add_trace(bars);
    plot.set_layout(layout);
    Ok(plot)
}
