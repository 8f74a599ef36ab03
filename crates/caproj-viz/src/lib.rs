//! caproj-viz: chart helpers for the capital-projects forecasting data.
//!
//! Every chart function builds one or more `plotly::Plot` values from
//! already-cleaned tables, 2D arrays or fitted models supplied by the caller.
//! Nothing is drawn implicitly: callers render the returned plots with
//! [`render::save_html`], [`render::show`] or by collecting them into a
//! [`report::Report`].
//!
//! Models are never fitted here. GAM and linear-regression results reach the
//! plotting code through the [`models::AdditiveModel`] and
//! [`models::LinearModel`] traits.
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod plots;
pub mod records;
pub mod render;
pub mod report;
pub mod stats;
pub mod table;

pub use error::{Result, VizError};
pub use models::{Dataset, ModelDict};
pub use table::{Table, Tabular, ValueCounts};
