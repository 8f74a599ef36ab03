use plotly::common::{DashType, Line, Marker, MarkerSymbol, Mode, TickMode};
use plotly::{Plot, Scatter};

use crate::error::{Result, VizError};
use crate::models::{LinearModel, ModelDict};
use crate::plots::figure::{grid_axis, suptitle, title_margin, FigSize, Grid};

/// Options for [`plot_coefficients`].
#[derive(Debug, Clone, Copy)]
pub struct CoefficientStyle {
    /// `(rows, cols)` of the panel grid. Only two columns are supported.
    pub subplots: (usize, usize),
    pub fig_height: f64,
    /// Vertical position of the super-title in paper coordinates.
    pub suptitle_spacing: f64,
}

impl Default for CoefficientStyle {
    fn default() -> Self {
        Self {
            subplots: (1, 2),
            fig_height: 8.0,
            suptitle_spacing: 1.0,
        }
    }
}

/// Estimates and interval bounds of one model, last parameter first so the
/// first parameter ends up at the top of the y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRows {
    pub features: Vec<String>,
    pub estimates: Vec<f64>,
    pub ci_lower: Vec<f64>,
    pub ci_upper: Vec<f64>,
}

impl CoefficientRows {
    pub fn from_model<M: LinearModel>(model: &M) -> Result<Self> {
        let params = model.params();
        let ci = model.conf_int();
        if params.len() != ci.len() {
            return Err(VizError::shape(params.len(), ci.len()));
        }
        Ok(Self {
            features: params.iter().rev().map(|(n, _)| n.clone()).collect(),
            estimates: params.iter().rev().map(|(_, v)| *v).collect(),
            ci_lower: ci.iter().rev().map(|(lo, _)| *lo).collect(),
            ci_upper: ci.iter().rev().map(|(_, hi)| *hi).collect(),
        })
    }
}

/// Predictors of every panel in one bottom-to-top order: the first model's
/// rows, then any predictor a later model adds, stacked above.
pub fn shared_predictors(rows: &[CoefficientRows]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for feature in rows.iter().flat_map(|r| &r.features) {
        if !order.contains(feature) {
            order.push(feature.clone());
        }
    }
    order
}

/// Coefficient estimates with 95% confidence intervals, one panel per outcome
/// variable, sharing the predictor axis.
pub fn plot_coefficients<M: LinearModel>(
    model_dict: &ModelDict<M>,
    style: &CoefficientStyle,
) -> Result<Plot> {
    let (rows, cols) = style.subplots;
    if cols != 2 {
        return Err(VizError::InvalidArgument(format!(
            "coefficient plots need exactly 2 subplot columns, got {}",
            cols
        )));
    }
    let grid = Grid::new(rows, cols)?.with_top_margin(0.06);
    let n_models = model_dict.models.len();
    if n_models == 0 {
        return Err(VizError::EmptyInput("models"));
    }
    if n_models > grid.len() {
        return Err(VizError::InvalidArgument(format!(
            "{} models do not fit a {}x{} subplot grid",
            n_models, rows, cols
        )));
    }
    if model_dict.y_variables.len() < n_models {
        return Err(VizError::shape(n_models, model_dict.y_variables.len()));
    }

    let panels = model_dict
        .models
        .iter()
        .map(CoefficientRows::from_model)
        .collect::<Result<Vec<_>>>()?;
    if panels.iter().any(|rows| rows.features.is_empty()) {
        return Err(VizError::EmptyInput("model parameters"));
    }
    let predictors = shared_predictors(&panels);
    let position = |feature: &String| {
        predictors
            .iter()
            .position(|p| p == feature)
            .unwrap_or_default() as f64
    };
    let tick_values: Vec<f64> = (0..predictors.len()).map(|i| i as f64).collect();
    let y_range = vec![-0.5, predictors.len() as f64 - 0.5];

    let mut plot = Plot::new();
    let mut layout = FigSize::new(12.0, style.fig_height)
        .layout()
        .show_legend(false)
        .margin(title_margin(2));
    let title = format!(
        "{}:<br>Coefficient values and 95% confidence intervals by outcome variable",
        model_dict.description
    );
    let mut annotations = vec![suptitle(&title, style.suptitle_spacing, 16)];

    for ((cell, coefs), y_var) in grid.cells().zip(&panels).zip(&model_dict.y_variables) {
        let (xr, yr) = (cell.x_ref(), cell.y_ref());
        let row_positions: Vec<f64> = coefs.features.iter().map(position).collect();
        let (lo, hi) = coefs
            .ci_lower
            .iter()
            .chain(&coefs.ci_upper)
            .chain(&coefs.estimates)
            .fold((0.0f64, 0.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        plot.add_trace(
            Scatter::new(vec![0.0, 0.0], vec![0.0, tick_values.len() as f64 - 1.0])
                .mode(Mode::Lines)
                .line(Line::new().color("red").dash(DashType::Dash))
                .opacity(0.5)
                .x_axis(&xr)
                .y_axis(&yr),
        );
        for ((row, ci0), ci1) in row_positions.iter().zip(&coefs.ci_lower).zip(&coefs.ci_upper) {
            plot.add_trace(
                Scatter::new(vec![*ci0, *ci1], vec![*row, *row])
                    .mode(Mode::Lines)
                    .line(Line::new().color("black"))
                    .x_axis(&xr)
                    .y_axis(&yr),
            );
        }
        plot.add_trace(
            Scatter::new(coefs.estimates.clone(), row_positions)
                .mode(Mode::Markers)
                .marker(
                    Marker::new()
                        .color("black")
                        .symbol(MarkerSymbol::Circle)
                        .size(10),
                )
                .text_array(coefs.features.clone())
                .x_axis(&xr)
                .y_axis(&yr),
        );

        annotations.push(cell.title(&format!("{} Model", y_var.replace('_', " ")), 16));
        let pad = ((hi - lo) * 0.05).max(1e-9);
        let x_axis = grid_axis()
            .title("coefficient estimate")
            .range(vec![lo - pad, hi + pad]);

        // every panel carries the same predictor rows, so labels on the
        // left column read for the whole grid row
        let mut y_axis = grid_axis()
            .tick_mode(TickMode::Array)
            .tick_values(tick_values.clone())
            .tick_text(predictors.clone())
            .range(y_range.clone());
        if cell.col == 0 {
            y_axis = y_axis.title("predictor");
        } else {
            y_axis = y_axis.show_tick_labels(false);
        }
        layout = cell.apply(layout, x_axis, y_axis);
    }
    layout = grid.blank_from(layout, n_models);

    plot.set_layout(layout.annotations(annotations));
    Ok(plot)
}
