use ndarray::Array2;
use plotly::common::{Line, Marker, MarkerSymbol, Mode};
use plotly::layout::Legend;
use plotly::{Plot, Scatter};

use crate::error::Result;
use crate::plots::figure::{css_color, grid_axis, suptitle, title_margin, FigSize, Grid};
use crate::stats::column_correlation;
use crate::table::{two_columns, Tabular};

/// Options for [`plot_2d_embed_scatter`].
#[derive(Debug, Clone)]
pub struct EmbedScatterStyle {
    pub data1_name: String,
    pub data2_name: String,
    pub height: f64,
    /// Marker size in pixels; plotly's default when `None`.
    pub point_size: Option<usize>,
}

impl Default for EmbedScatterStyle {
    fn default() -> Self {
        Self {
            data1_name: "training obs".to_string(),
            data2_name: "TEST obs".to_string(),
            height: 5.0,
            point_size: None,
        }
    }
}

fn points(data: &Array2<f64>) -> (Vec<f64>, Vec<f64>) {
    (data.column(0).to_vec(), data.column(1).to_vec())
}

/// Scatter of two sets of 2D embeddings, e.g. encoded train and test rows.
///
/// Both inputs must have exactly two columns. Tables and arrays holding the
/// same numbers plot identically.
pub fn plot_2d_embed_scatter<A, B>(
    data1: &A,
    data2: &B,
    title: &str,
    xlabel: &str,
    ylabel: &str,
    style: &EmbedScatterStyle,
) -> Result<Plot>
where
    A: Tabular + ?Sized,
    B: Tabular + ?Sized,
{
    let data1 = two_columns(data1)?;
    let data2 = two_columns(data2)?;

    let marker = |color: &str| {
        let m = Marker::new().color(color.to_string());
        match style.point_size {
            Some(size) => m.size(size),
            None => m,
        }
    };

    let mut plot = Plot::new();
    for (data, color, name) in [
        (&data1, "silver", &style.data1_name),
        (&data2, "black", &style.data2_name),
    ] {
        let (x, y) = points(data);
        plot.add_trace(
            Scatter::new(x, y)
                .mode(Mode::Markers)
                .marker(marker(color))
                .name(name.as_str()),
        );
    }
    plot.set_layout(
        FigSize::new(12.0, style.height)
            .layout()
            .title(title)
            .x_axis(grid_axis().title(xlabel))
            .y_axis(grid_axis().title(ylabel))
            .legend(Legend::new().border_color("black").border_width(1)),
    );
    Ok(plot)
}

/// Column names used when budget/schedule inputs are tables.
#[derive(Debug, Clone)]
pub struct BudgetScheduleColumns {
    pub budget: String,
    pub schedule: String,
}

impl Default for BudgetScheduleColumns {
    fn default() -> Self {
        Self {
            budget: "Budget_Start".to_string(),
            schedule: "Duration_Start".to_string(),
        }
    }
}

/// Budget/schedule pairs before and after scaling, as plotted by
/// [`plot_bdgt_sched_scaled`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledComparison {
    pub original: Array2<f64>,
    pub scaled: Array2<f64>,
    pub original_test: Option<Array2<f64>>,
    pub scaled_test: Option<Array2<f64>>,
    pub corr: f64,
    pub corr_scaled: f64,
}

impl ScaledComparison {
    /// Select the budget and schedule columns and correlate them in both the
    /// original and the scaled training data.
    pub fn compute<T: Tabular + ?Sized>(
        x: &T,
        x_scaled: &T,
        x_test: Option<&T>,
        x_test_scaled: Option<&T>,
        columns: &BudgetScheduleColumns,
    ) -> Result<Self> {
        let cols = [columns.budget.as_str(), columns.schedule.as_str()];
        let original = x.select_columns(&cols)?;
        let scaled = x_scaled.select_columns(&cols)?;
        let corr = column_correlation(original.view())?;
        let corr_scaled = column_correlation(scaled.view())?;
        log::debug!(
            "budget/schedule correlation: original {:.4}, scaled {:.4}",
            corr,
            corr_scaled
        );
        Ok(Self {
            original,
            scaled,
            original_test: x_test.map(|t| t.select_columns(&cols)).transpose()?,
            scaled_test: x_test_scaled.map(|t| t.select_columns(&cols)).transpose()?,
            corr,
            corr_scaled,
        })
    }
}

/// Original vs. scaled budget and duration values, side by side.
///
/// Test data, when given, is overlaid as orange squares.
pub fn plot_bdgt_sched_scaled<T: Tabular + ?Sized>(
    x: &T,
    x_scaled: &T,
    scale_descr: &str,
    x_test: Option<&T>,
    x_test_scaled: Option<&T>,
    columns: &BudgetScheduleColumns,
) -> Result<Plot> {
    let cmp = ScaledComparison::compute(x, x_scaled, x_test, x_test_scaled, columns)?;

    let grid = Grid::new(1, 2)?.with_top_margin(0.08);
    let mut plot = Plot::new();
    let mut layout = FigSize::new(12.0, 6.0)
        .layout()
        .margin(title_margin(1))
        .legend(Legend::new().border_color("black").border_width(1).x(1.0).y(0.0));
    let mut annotations = vec![suptitle(
        &format!(
            "Original budget and duration values vs. {} scaled values",
            scale_descr
        ),
        1.0,
        18,
    )];

    let panels = [
        (
            &cmp.original,
            cmp.original_test.as_ref(),
            format!("Original data<br>({:.2} pearson coefficient)", cmp.corr),
        ),
        (
            &cmp.scaled,
            cmp.scaled_test.as_ref(),
            format!(
                "{} scaled<br>({:.2} pearson coefficient)",
                scale_descr, cmp.corr_scaled
            ),
        ),
    ];

    for (cell, (train, test, title)) in grid.cells().zip(panels) {
        let (xr, yr) = (cell.x_ref(), cell.y_ref());
        let first = cell.index == 0;

        let (bx, by) = points(train);
        plot.add_trace(
            Scatter::new(bx, by)
                .mode(Mode::Markers)
                .marker(
                    Marker::new()
                        .color("black")
                        .opacity(0.5)
                        .size(9)
                        .line(Line::new().color("white").width(1.0)),
                )
                .name("training obs")
                .legend_group("training obs")
                .show_legend(first)
                .x_axis(&xr)
                .y_axis(&yr),
        );
        if let Some(test) = test {
            let (tx, ty) = points(test);
            plot.add_trace(
                Scatter::new(tx, ty)
                    .mode(Mode::Markers)
                    .marker(
                        Marker::new()
                            .color(css_color("tab:orange"))
                            .symbol(MarkerSymbol::Square)
                            .size(9)
                            .line(Line::new().color("white").width(1.0)),
                    )
                    .name("test obs")
                    .legend_group("test obs")
                    .show_legend(first)
                    .x_axis(&xr)
                    .y_axis(&yr),
            );
        }

        annotations.push(cell.title(&title, 14));
        let y_axis = if first {
            grid_axis().title("Duration (days)")
        } else {
            grid_axis()
        };
        layout = cell.apply(layout, grid_axis().title("Budget"), y_axis);
    }

    plot.set_layout(layout.annotations(annotations));
    Ok(plot)
}
