use ndarray::{Array1, Array2};
use plotly::common::{DashType, Line, Marker, Mode};
use plotly::{Plot, Scatter};

use crate::error::{Result, VizError};
use crate::models::{AdditiveModel, Dataset, ModelDict};
use crate::plots::figure::{grid_axis, suptitle, title_margin, FigSize, Grid, MAX_PANELS};
use crate::table::{Table, Tabular};

/// Confidence level of the partial-dependence bands.
pub const CI_WIDTH: f64 = 0.95;

/// Partial dependence of one GAM term, on the term's grid and at the observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDependence {
    pub term: usize,
    pub feature: usize,
    pub name: String,
    pub grid_x: Array1<f64>,
    pub grid_pdep: Array1<f64>,
    /// (n, 2) lower and upper bounds on the grid.
    pub grid_ci: Array2<f64>,
    pub observed_x: Array1<f64>,
    /// Partial dependence at each observation plus its deviance residual.
    pub observed_y: Array1<f64>,
}

/// Evaluate every non-intercept term of the GAM at `model_index`.
pub fn term_dependences<M: AdditiveModel>(
    model_dict: &ModelDict<M>,
    model_index: usize,
    x_data: &Table,
    y_data: &dyn Tabular,
) -> Result<Vec<TermDependence>> {
    let model = model_dict.models.get(model_index).ok_or_else(|| {
        VizError::InvalidArgument(format!(
            "model index {} out of range for {} models",
            model_index,
            model_dict.models.len()
        ))
    })?;
    let y = y_data.to_array();
    if model_index >= y.ncols() {
        return Err(VizError::WrongColumnCount {
            expected: model_index + 1,
            found: y.ncols(),
        });
    }
    if y.nrows() != x_data.nrows() {
        return Err(VizError::shape(x_data.nrows(), y.nrows()));
    }

    let x = x_data.data().view();
    let res = model.deviance_residuals(x, y.column(model_index))?;

    let mut out = Vec::new();
    for (i, term) in model.terms().into_iter().enumerate() {
        let Some(feature) = term.feature else {
            continue;
        };
        let name = x_data
            .columns()
            .get(i)
            .ok_or_else(|| VizError::UnknownColumn(format!("predictor #{}", i)))?
            .clone();
        if feature >= x_data.ncols() {
            return Err(VizError::UnknownColumn(format!("feature #{}", feature)));
        }

        let xx = model.generate_x_grid(i)?;
        let (pdep, confi) = model.partial_dependence(i, xx.view(), CI_WIDTH)?;
        let (pdep_obs, _) = model.partial_dependence(i, x, CI_WIDTH)?;
        if pdep_obs.len() != res.len() {
            return Err(VizError::shape(res.len(), pdep_obs.len()));
        }

        out.push(TermDependence {
            term: i,
            feature,
            name,
            grid_x: xx.column(feature).to_owned(),
            grid_pdep: pdep,
            grid_ci: confi,
            observed_x: x.column(feature).to_owned(),
            observed_y: &pdep_obs + &res,
        });
    }
    Ok(out)
}

/// Partial dependence and 95% confidence band of each predictor of a GAM,
/// over the observations it was illustrated with.
///
/// Panels are laid out two per row. A figure holds at most eight panels, so
/// models with more predictors are returned as several figures.
pub fn plot_gam_by_predictor<M: AdditiveModel>(
    model_dict: &ModelDict<M>,
    model_index: usize,
    x_data: &Table,
    y_data: &dyn Tabular,
    dataset: Dataset,
    suptitle_y: f64,
) -> Result<Vec<Plot>> {
    let terms = term_dependences(model_dict, model_index, x_data, y_data)?;
    if terms.is_empty() {
        return Err(VizError::EmptyInput("model terms"));
    }
    let y_varname = model_dict
        .y_variables
        .get(model_index)
        .map(|v| v.replace('_', " "))
        .unwrap_or_default();
    let title = format!(
        "{} predictions:<br>Contribution of each predictor to overall function \
         (partial dependence and 95% CI)<br>{}<br>Illustrated with {} observations",
        y_varname.to_uppercase(),
        model_dict.description,
        dataset.observation_label()
    );

    let mut plots = Vec::new();
    for chunk in terms.chunks(MAX_PANELS) {
        let n_rows = (chunk.len() + 1) / 2;
        let grid = Grid::new(n_rows, 2)?.with_top_margin(0.04);
        let mut plot = Plot::new();
        let mut layout = FigSize::new(12.0, 4.0 * n_rows as f64)
            .layout()
            .show_legend(false)
            .margin(title_margin(4));
        let mut annotations = vec![suptitle(&title, suptitle_y, 18)];

        for (cell, dep) in grid.cells().zip(chunk) {
            let (xr, yr) = (cell.x_ref(), cell.y_ref());
            plot.add_trace(
                Scatter::new(dep.observed_x.to_vec(), dep.observed_y.to_vec())
                    .mode(Mode::Markers)
                    .marker(Marker::new().color("silver"))
                    .x_axis(&xr)
                    .y_axis(&yr),
            );
            plot.add_trace(
                Scatter::new(dep.grid_x.to_vec(), dep.grid_pdep.to_vec())
                    .mode(Mode::Lines)
                    .line(Line::new().color("black"))
                    .x_axis(&xr)
                    .y_axis(&yr),
            );
            for bound in 0..dep.grid_ci.ncols() {
                plot.add_trace(
                    Scatter::new(
                        dep.grid_x.to_vec(),
                        dep.grid_ci.column(bound).to_vec(),
                    )
                    .mode(Mode::Lines)
                    .line(Line::new().color("black").dash(DashType::Dash))
                    .x_axis(&xr)
                    .y_axis(&yr),
                );
            }

            annotations.push(cell.title(&dep.name, 14));
            let y_axis = if cell.col == 0 {
                grid_axis().title("partial dependence")
            } else {
                grid_axis()
            };
            layout = cell.apply(layout, grid_axis().title("observed values"), y_axis);
        }
        layout = grid.blank_from(layout, chunk.len());

        plot.set_layout(layout.annotations(annotations));
        plots.push(plot);
    }
    Ok(plots)
}
