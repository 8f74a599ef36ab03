use plotly::common::{Line, Marker, MarkerSymbol, Mode};
use plotly::{Plot, Scatter};

use crate::error::{Result, VizError};
use crate::plots::figure::{grid_axis, FigSize};
use crate::render::figure_layout;

/// Black line with circle markers through `(x_vals, y_vals)`.
///
/// The figure is 12 inches wide and `height` inches tall.
pub fn plot_line(
    x_vals: &[f64],
    y_vals: &[f64],
    title: &str,
    x_label: &str,
    y_label: &str,
    height: f64,
) -> Result<Plot> {
    if x_vals.len() != y_vals.len() {
        return Err(VizError::shape(x_vals.len(), y_vals.len()));
    }
    if x_vals.is_empty() {
        return Err(VizError::EmptyInput("line values"));
    }

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(x_vals.to_vec(), y_vals.to_vec())
            .mode(Mode::LinesMarkers)
            .line(Line::new().color("black"))
            .marker(Marker::new().color("black").symbol(MarkerSymbol::Circle))
            .show_legend(false),
    );
    plot.set_layout(
        figure_layout(FigSize::new(12.0, height), title)
            .x_axis(grid_axis().title(x_label))
            .y_axis(grid_axis().title(y_label)),
    );
    Ok(plot)
}
