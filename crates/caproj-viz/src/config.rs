//! Plot defaults that callers may override from a JSON file.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plots::coefficients::CoefficientStyle;
use crate::plots::counts::{BarplotStyle, ValueCountsStyle};
use crate::plots::distribution::HistCompsStyle;
use crate::plots::figure::FigSize;
use crate::plots::picture::IMAGE_FIGSIZE;

/// Figure sizes, in inches, per chart kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSizes {
    pub value_counts: FigSize,
    pub barplot_height: f64,
    pub line_height: f64,
    pub embed_height: f64,
    pub coefficient_height: f64,
    pub image: FigSize,
}

impl Default for FigureSizes {
    fn default() -> Self {
        Self {
            value_counts: FigSize::new(9.0, 3.0),
            barplot_height: 6.0,
            line_height: 3.5,
            embed_height: 5.0,
            coefficient_height: 8.0,
            image: IMAGE_FIGSIZE,
        }
    }
}

/// Settings shared by every chart a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Directory reports are written to.
    pub output_dir: PathBuf,
    pub report_title: String,
    pub bar_color: String,
    pub hist_bins: usize,
    pub y_log: bool,
    pub figure_sizes: FigureSizes,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            report_title: "Capital Projects Report".to_string(),
            bar_color: "tab:blue".to_string(),
            hist_bins: 20,
            y_log: false,
            figure_sizes: FigureSizes::default(),
        }
    }
}

impl PlotConfig {
    pub fn value_counts_style(&self) -> ValueCountsStyle {
        ValueCountsStyle {
            figsize: self.figure_sizes.value_counts,
            color: self.bar_color.clone(),
        }
    }

    pub fn barplot_style(&self, varname: Option<String>) -> BarplotStyle {
        BarplotStyle {
            height: self.figure_sizes.barplot_height,
            varname,
            color: self.bar_color.clone(),
            ..BarplotStyle::default()
        }
    }

    pub fn hist_style(&self) -> HistCompsStyle {
        HistCompsStyle {
            y_log: self.y_log,
            bins: self.hist_bins,
        }
    }

    pub fn coefficient_style(&self, n_models: usize) -> CoefficientStyle {
        CoefficientStyle {
            subplots: (((n_models + 1) / 2).max(1), 2),
            fig_height: self.figure_sizes.coefficient_height,
            ..CoefficientStyle::default()
        }
    }
}

/// Read a [`PlotConfig`] from JSON. Missing fields keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<PlotConfig> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: PlotConfig = serde_json::from_str(&content)?;
    log::debug!("Loaded plot config from {}", path.as_ref().display());
    Ok(config)
}
