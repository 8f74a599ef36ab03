use ndarray::{Array1, Array2, Axis};
use plotly::common::{DashType, Line, Marker, MarkerSymbol, Mode};
use plotly::layout::Legend;
use plotly::{Plot, Scatter};

use crate::error::{Result, VizError};
use crate::models::{Dataset, ModelDict};
use crate::plots::figure::{grid_axis, suptitle, title_margin, FigSize, Grid};
use crate::stats::{r2_per_output, residuals};
use crate::table::{two_columns, Tabular};

/// Overrides for titles and labels of [`plot_true_pred`].
#[derive(Debug, Clone, Default)]
pub struct TruePredOptions {
    pub dataset: Dataset,
    pub model_descr: Option<String>,
    pub y1_label: Option<String>,
    pub y2_label: Option<String>,
}

/// True and predicted values of a two-output model with everything the
/// prediction figures display.
#[derive(Debug, Clone, PartialEq)]
pub struct TruePredSummary {
    pub y_true: Array2<f64>,
    pub y_pred: Array2<f64>,
    /// `pred - true`, one column per output.
    pub residuals: Array2<f64>,
    pub r2_scores: Vec<f64>,
    pub labels: [String; 2],
    pub model_descr: String,
    pub dataset: Dataset,
}

impl TruePredSummary {
    /// Summarize a model dictionary's stored results for `opts.dataset`.
    pub fn from_model_dict<M>(model_dict: &ModelDict<M>, opts: &TruePredOptions) -> Result<Self> {
        let y_true = model_dict.y_values.get(opts.dataset);
        let y_pred = model_dict.predictions.get(opts.dataset);
        let scores = model_dict.score.get(opts.dataset).clone();
        let names = model_dict.display_y_variables();
        let labels = [
            opts.y1_label.clone().or_else(|| names.first().cloned()),
            opts.y2_label.clone().or_else(|| names.get(1).cloned()),
        ];
        let model_descr = opts
            .model_descr
            .clone()
            .unwrap_or_else(|| model_dict.description.clone());
        Self::build(y_true, y_pred, Some(scores), labels, model_descr, opts.dataset)
    }

    /// Summarize explicit true/predicted arrays, scoring each output with R².
    ///
    /// Without a model dictionary there is nothing to fall back on, so the
    /// description and both labels must be given.
    pub fn from_arrays<A, B>(y_true: &A, y_pred: &B, opts: &TruePredOptions) -> Result<Self>
    where
        A: Tabular + ?Sized,
        B: Tabular + ?Sized,
    {
        let model_descr = opts.model_descr.clone().ok_or_else(|| {
            VizError::InvalidArgument("model_descr is required without a model dictionary".into())
        })?;
        let labels = [opts.y1_label.clone(), opts.y2_label.clone()];
        Self::build(
            &y_true.to_array(),
            &y_pred.to_array(),
            None,
            labels,
            model_descr,
            opts.dataset,
        )
    }

    fn build(
        y_true: &Array2<f64>,
        y_pred: &Array2<f64>,
        scores: Option<Vec<f64>>,
        labels: [Option<String>; 2],
        model_descr: String,
        dataset: Dataset,
    ) -> Result<Self> {
        let y_true = two_columns(y_true)?;
        let y_pred = two_columns(y_pred)?;
        if y_true.nrows() != y_pred.nrows() {
            return Err(VizError::shape(y_true.dim(), y_pred.dim()));
        }
        if y_true.nrows() == 0 {
            return Err(VizError::EmptyInput("y_true"));
        }
        let r2_scores = match scores {
            Some(s) if s.len() == 2 => s,
            _ => r2_per_output(y_true.view(), y_pred.view())?,
        };
        let [l1, l2] = labels;
        let labels = [
            l1.ok_or_else(|| VizError::InvalidArgument("y1_label is required".into()))?,
            l2.ok_or_else(|| VizError::InvalidArgument("y2_label is required".into()))?,
        ];

        let mut res = Array2::<f64>::zeros(y_true.dim());
        for (j, mut col) in res.axis_iter_mut(Axis(1)).enumerate() {
            col.assign(&residuals(y_true.column(j), y_pred.column(j))?);
        }

        Ok(Self {
            y_true,
            y_pred,
            residuals: res,
            r2_scores,
            labels,
            model_descr,
            dataset,
        })
    }
}

fn data_range(a: &Array1<f64>, b: &Array1<f64>) -> (f64, f64) {
    let (lo, hi) = a
        .iter()
        .chain(b.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let pad = ((hi - lo) * 0.05).max(1e-9);
    (lo - pad, hi + pad)
}

/// Prediction figures for a model dictionary's stored train or test results.
///
/// See [`plot_true_pred_summary`] for the figures produced.
pub fn plot_true_pred<M>(model_dict: &ModelDict<M>, opts: &TruePredOptions) -> Result<Vec<Plot>> {
    plot_true_pred_summary(&TruePredSummary::from_model_dict(model_dict, opts)?)
}

/// Prediction figures from explicit (n, 2) true and predicted values.
pub fn plot_true_pred_arrays<A, B>(y_true: &A, y_pred: &B, opts: &TruePredOptions) -> Result<Vec<Plot>>
where
    A: Tabular + ?Sized,
    B: Tabular + ?Sized,
{
    plot_true_pred_summary(&TruePredSummary::from_arrays(y_true, y_pred, opts)?)
}

/// Three figures: true and predicted values on the output plane, predicted
/// vs. true per output with its R², and residuals vs. true per output.
pub fn plot_true_pred_summary(summary: &TruePredSummary) -> Result<Vec<Plot>> {
    Ok(vec![
        overlay_figure(summary),
        per_output_figure(summary)?,
        residual_figure(summary)?,
    ])
}

fn overlay_figure(s: &TruePredSummary) -> Plot {
    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(s.y_true.column(0).to_vec(), s.y_true.column(1).to_vec())
            .mode(Mode::Markers)
            .marker(
                Marker::new()
                    .color("silver")
                    .symbol(MarkerSymbol::Square)
                    .size(10)
                    .line(Line::new().color("gray").width(1.0)),
            )
            .name("True values"),
    );
    plot.add_trace(
        Scatter::new(s.y_pred.column(0).to_vec(), s.y_pred.column(1).to_vec())
            .mode(Mode::Markers)
            .marker(
                Marker::new()
                    .color("#00bfbf")
                    .symbol(MarkerSymbol::Circle)
                    .size(10)
                    .line(Line::new().color("black").width(1.0)),
            )
            .name("Predicted values"),
    );

    let title = format!(
        "{} predictions vs. true values for<br>{}",
        s.dataset.title_label(),
        s.model_descr
    );
    plot.set_layout(
        FigSize::new(12.0, 6.0)
            .layout()
            .title(title.as_str())
            .x_axis(grid_axis().title(s.labels[0].as_str()))
            .y_axis(grid_axis().title(s.labels[1].as_str()))
            .legend(Legend::new().border_color("black").border_width(1)),
    );
    plot
}

fn per_output_figure(s: &TruePredSummary) -> Result<Plot> {
    let grid = Grid::new(1, 2)?.with_top_margin(0.1);
    let mut plot = Plot::new();
    let mut layout = FigSize::new(12.0, 5.0)
        .layout()
        .show_legend(false)
        .margin(title_margin(1));
    let mut annotations = vec![suptitle(
        "Predictions and residuals vs. true values by output variable",
        1.0,
        16,
    )];

    for cell in grid.cells() {
        let j = cell.index;
        let truth = s.y_true.column(j).to_owned();
        let pred = s.y_pred.column(j).to_owned();
        let (lo, hi) = data_range(&truth, &pred);

        plot.add_trace(
            Scatter::new(truth.to_vec(), pred.to_vec())
                .mode(Mode::Markers)
                .marker(
                    Marker::new()
                        .color("black")
                        .opacity(0.5)
                        .size(10)
                        .line(Line::new().color("white").width(1.0)),
                )
                .x_axis(&cell.x_ref())
                .y_axis(&cell.y_ref()),
        );
        annotations.push(cell.title(
            &format!("{}<br>R^2={:.3}", s.labels[j], s.r2_scores[j]),
            14,
        ));

        // same range on both axes keeps the unit diagonal at 45 degrees
        let x_axis = grid_axis().title("True value").range(vec![lo, hi]);
        let mut y_axis = grid_axis().range(vec![lo, hi]);
        if j == 0 {
            y_axis = y_axis.title("Predicted value");
        }
        layout = cell.apply(layout, x_axis, y_axis);
    }

    plot.set_layout(layout.annotations(annotations));
    Ok(plot)
}

fn residual_figure(s: &TruePredSummary) -> Result<Plot> {
    let grid = Grid::new(1, 2)?.with_top_margin(0.05);
    let mut plot = Plot::new();
    let mut layout = FigSize::new(12.0, 3.0).layout().show_legend(false);
    let mut annotations = Vec::new();

    for cell in grid.cells() {
        let j = cell.index;
        let truth = s.y_true.column(j).to_vec();
        let (lo, hi) = truth
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        plot.add_trace(
            Scatter::new(truth, s.residuals.column(j).to_vec())
                .mode(Mode::Markers)
                .marker(
                    Marker::new()
                        .color("black")
                        .opacity(0.5)
                        .size(10)
                        .line(Line::new().color("white").width(1.0)),
                )
                .x_axis(&cell.x_ref())
                .y_axis(&cell.y_ref()),
        );
        plot.add_trace(
            Scatter::new(vec![lo, hi], vec![0.0, 0.0])
                .mode(Mode::Lines)
                .line(Line::new().color("black").dash(DashType::Dash))
                .x_axis(&cell.x_ref())
                .y_axis(&cell.y_ref()),
        );
        annotations.push(cell.title("Residuals", 14));

        let y_axis = if j == 0 {
            grid_axis().title("Prediction error")
        } else {
            grid_axis()
        };
        layout = cell.apply(layout, grid_axis().title("True value"), y_axis);
    }

    plot.set_layout(layout.annotations(annotations));
    Ok(plot)
}
