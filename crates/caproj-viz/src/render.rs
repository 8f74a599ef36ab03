//! Turning plots into something a person can look at.
use std::path::Path;

use plotly::layout::Layout;
use plotly::Plot;

use crate::error::Result;
use crate::plots::figure::FigSize;

/// Write `plot` as a standalone HTML page.
pub fn save_html(plot: &Plot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, plot.to_html())?;
    log::info!("Plot saved to {}", path.display());
    Ok(())
}

/// Open `plot` in the default browser.
pub fn show(plot: &Plot) {
    plot.show();
}

/// Base layout for a figure of `figsize` inches titled `title`.
pub fn figure_layout(figsize: FigSize, title: &str) -> Layout {
    figsize.layout().title(title)
}
