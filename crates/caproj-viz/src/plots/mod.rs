//! Chart functions. Each one builds and returns `plotly::Plot` values; see
//! [`crate::render`] and [`crate::report`] for turning them into HTML.
pub mod coefficients;
pub mod counts;
pub mod distribution;
pub mod embedding;
pub mod figure;
pub mod gam;
pub mod line;
pub mod picture;
pub mod prediction;
pub mod trend;

pub use coefficients::{plot_coefficients, CoefficientStyle};
pub use counts::{plot_barplot, plot_value_counts, BarplotStyle, ValueCountsStyle};
pub use distribution::{plot_hist_comps, HistCompsStyle};
pub use embedding::{
    plot_2d_embed_scatter, plot_bdgt_sched_scaled, BudgetScheduleColumns, EmbedScatterStyle,
};
pub use figure::FigSize;
pub use gam::plot_gam_by_predictor;
pub use line::plot_line;
pub use picture::{decode_image, display_sample, load_img_to_array, plot_jpg, IMAGE_FIGSIZE};
pub use prediction::{plot_true_pred, plot_true_pred_arrays, TruePredOptions};
pub use trend::plot_change_trend;
