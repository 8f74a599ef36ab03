//! Figure sizing, subplot grids and color names shared by the chart functions.
use plotly::common::{Anchor, Font};
use plotly::layout::{Annotation, Axis, Layout, Margin};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};

/// Pixels per inch used to turn figure sizes into plotly widths and heights.
pub const DPI: f64 = 100.0;

/// Most axis pairs a single plotly layout can address (`x` .. `x8`).
pub const MAX_PANELS: usize = 8;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigSize {
    pub width: f64,
    pub height: f64,
}

impl FigSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self) -> (usize, usize) {
        (
            (self.width * DPI).round() as usize,
            (self.height * DPI).round() as usize,
        )
    }

    /// Base layout of this size with the white template used by every chart.
    pub fn layout(&self) -> Layout {
        let (w, h) = self.pixels();
        Layout::new()
            .width(w)
            .height(h)
            .font(Font::new().size(12))
            .plot_background_color("white")
    }
}

/// Translate matplotlib color shorthands into CSS colors plotly understands.
/// Unknown names pass through unchanged.
pub fn css_color(name: &str) -> String {
    let css = match name {
        "k" => "black",
        "w" => "white",
        "r" => "red",
        "g" => "green",
        "b" => "blue",
        "c" => "#00bfbf",
        "m" => "#bf00bf",
        "y" => "#bfbf00",
        "tab:blue" => "#1f77b4",
        "tab:orange" => "#ff7f0e",
        "tab:green" => "#2ca02c",
        "tab:red" => "#d62728",
        "tab:purple" => "#9467bd",
        "tab:brown" => "#8c564b",
        "tab:pink" => "#e377c2",
        "tab:gray" | "tab:grey" => "#7f7f7f",
        "tab:olive" => "#bcbd22",
        "tab:cyan" => "#17becf",
        other => other,
    };
    css.to_string()
}

/// Axis with a light grid, as every chart here draws one.
pub fn grid_axis() -> Axis {
    Axis::new()
        .show_grid(true)
        .grid_color("rgba(0, 0, 0, 0.15)")
        .zero_line(false)
        .show_line(true)
        .line_color("black")
}

/// Axis with nothing drawn, used for unused trailing grid cells and images.
pub fn hidden_axis() -> Axis {
    Axis::new()
        .visible(false)
        .show_grid(false)
        .zero_line(false)
        .show_tick_labels(false)
}

/// Title placed above the whole figure, at `y` in paper coordinates.
pub fn suptitle(text: &str, y: f64, size: usize) -> Annotation {
    Annotation::new()
        .text(text)
        .x(0.5)
        .y(y)
        .x_ref("paper")
        .y_ref("paper")
        .x_anchor(Anchor::Center)
        .y_anchor(Anchor::Bottom)
        .show_arrow(false)
        .font(Font::new().size(size))
}

/// A rows x cols arrangement of panels inside one figure.
///
/// Panels are numbered row-major from the top left. Vertical space above the
/// first row is reserved for a super-title when `top_margin` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub h_gap: f64,
    pub v_gap: f64,
    pub top_margin: f64,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(VizError::InvalidArgument(
                "subplot grid needs at least one row and one column".into(),
            ));
        }
        if rows * cols > MAX_PANELS {
            return Err(VizError::InvalidArgument(format!(
                "a {}x{} grid exceeds the {} panels one figure supports",
                rows, cols, MAX_PANELS
            )));
        }
        Ok(Self {
            rows,
            cols,
            h_gap: 0.08,
            v_gap: if rows > 1 { 0.12 } else { 0.0 },
            top_margin: 0.0,
        })
    }

    pub fn with_top_margin(mut self, top_margin: f64) -> Self {
        self.top_margin = top_margin;
        self
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell(&self, index: usize) -> Cell {
        let row = index / self.cols;
        let col = index % self.cols;

        let cell_w = (1.0 - self.h_gap * (self.cols - 1) as f64) / self.cols as f64;
        let x0 = col as f64 * (cell_w + self.h_gap);

        let usable = 1.0 - self.top_margin;
        let cell_h = (usable - self.v_gap * (self.rows - 1) as f64) / self.rows as f64;
        let y1 = usable - row as f64 * (cell_h + self.v_gap);

        Cell {
            index,
            row,
            col,
            x_domain: [x0, x0 + cell_w],
            y_domain: [y1 - cell_h, y1],
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(move |i| self.cell(i))
    }

    /// Hide the axes of every cell from `first_unused` on.
    pub fn blank_from(&self, mut layout: Layout, first_unused: usize) -> Layout {
        for cell in (first_unused..self.len()).map(|i| self.cell(i)) {
            layout = cell.apply(layout, hidden_axis(), hidden_axis());
        }
        layout
    }
}

/// One panel of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub x_domain: [f64; 2],
    pub y_domain: [f64; 2],
}

impl Cell {
    fn suffix(&self) -> String {
        if self.index == 0 {
            String::new()
        } else {
            (self.index + 1).to_string()
        }
    }

    /// Axis reference for traces, e.g. `x` or `x3`.
    pub fn x_ref(&self) -> String {
        format!("x{}", self.suffix())
    }

    pub fn y_ref(&self) -> String {
        format!("y{}", self.suffix())
    }

    /// Install the panel's axes into `layout`, pinned to this cell's domain.
    pub fn apply(&self, layout: Layout, x_axis: Axis, y_axis: Axis) -> Layout {
        let x_axis = x_axis.domain(&self.x_domain).anchor(&self.y_ref());
        let y_axis = y_axis.domain(&self.y_domain).anchor(&self.x_ref());
        match self.index {
            0 => layout.x_axis(x_axis).y_axis(y_axis),
            1 => layout.x_axis2(x_axis).y_axis2(y_axis),
            2 => layout.x_axis3(x_axis).y_axis3(y_axis),
            3 => layout.x_axis4(x_axis).y_axis4(y_axis),
            4 => layout.x_axis5(x_axis).y_axis5(y_axis),
            5 => layout.x_axis6(x_axis).y_axis6(y_axis),
            6 => layout.x_axis7(x_axis).y_axis7(y_axis),
            _ => layout.x_axis8(x_axis).y_axis8(y_axis),
        }
    }

    /// Panel title centered above the cell.
    pub fn title(&self, text: &str, size: usize) -> Annotation {
        Annotation::new()
            .text(text)
            .x((self.x_domain[0] + self.x_domain[1]) / 2.0)
            .y(self.y_domain[1])
            .x_ref("paper")
            .y_ref("paper")
            .x_anchor(Anchor::Center)
            .y_anchor(Anchor::Bottom)
            .show_arrow(false)
            .font(Font::new().size(size))
    }
}

/// Layout margin leaving room for a multi-line super-title.
pub fn title_margin(lines: usize) -> Margin {
    Margin::new().top(60 + 22 * lines).bottom(60).left(70).right(30)
}
