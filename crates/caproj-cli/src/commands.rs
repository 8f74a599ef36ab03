//! One report builder per `caproj` subcommand.
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, PreEscaped};

use caproj_viz::config::PlotConfig;
use caproj_viz::io::{
    read_change_records, read_project_records, read_table, value_counts_from_csv,
};
use caproj_viz::models::{CoefficientSummary, Dataset, ModelDict};
use caproj_viz::plots::{
    plot_barplot, plot_bdgt_sched_scaled, plot_change_trend, plot_coefficients, plot_hist_comps,
    plot_jpg, plot_true_pred_arrays, plot_value_counts, BudgetScheduleColumns, TruePredOptions,
};
use caproj_viz::report::{Report, ReportSection};
use caproj_viz::Table;

pub fn new_report(config: &PlotConfig, subtitle: &str) -> Report {
    Report::new(
        "caproj",
        env!("CARGO_PKG_VERSION"),
        None,
        &format!("{}: {}", config.report_title, subtitle),
    )
}

fn config_section(config: &PlotConfig) -> Result<ReportSection> {
    let mut section = ReportSection::new("Configuration");
    section.add_content(html! {
        style {
            ".code-container {
                background-color: #f5f5f5;
                padding: 10px;
                border-radius: 5px;
                overflow-x: auto;
                font-family: monospace;
                white-space: pre-wrap;
            }"
        }
        div class="code-container" {
            pre {
                code { (PreEscaped(serde_json::to_string_pretty(config)?)) }
            }
        }
    });
    Ok(section)
}

fn finish(mut report: Report, section: ReportSection, config: &PlotConfig) -> Result<Report> {
    report.add_section(section);
    report.add_section(config_section(config)?);
    Ok(report)
}

fn read_numeric(path: &Path) -> Result<Table> {
    read_table(path, None).with_context(|| format!("Failed to read table: {}", path.display()))
}

/// Category counts of one text column.
pub fn counts_report(
    csv: &Path,
    column: &str,
    horizontal: bool,
    title: Option<&str>,
    config: &PlotConfig,
) -> Result<Report> {
    let counts = value_counts_from_csv(csv, column)
        .with_context(|| format!("Failed to count column {} in {}", column, csv.display()))?;
    log::info!("[caproj] {} distinct values in {}", counts.len(), column);

    let title = title.map(str::to_string).unwrap_or_else(|| format!("Projects by {}", column));
    let plot = if horizontal {
        plot_barplot(&counts, &title, &config.barplot_style(Some(column.to_string())))?
    } else {
        plot_value_counts(&counts, &config.value_counts_style())?
    };

    let mut section = ReportSection::new(&title);
    section.add_content(html! {
        p { (counts.len()) " categories in column " code { (column) } "." }
    });
    section.add_plot(plot);
    finish(new_report(config, "Value counts"), section, config)
}

/// Histograms of two metric columns.
pub fn hist_report(csv: &Path, metric_1: &str, metric_2: &str, config: &PlotConfig) -> Result<Report> {
    let table = read_table(csv, Some(&[metric_1, metric_2][..]))
        .with_context(|| format!("Failed to read table: {}", csv.display()))?;
    let plot = plot_hist_comps(&table, metric_1, metric_2, &config.hist_style())?;

    let mut section = ReportSection::new("Distributions");
    section.add_content(html! {
        p { (table.nrows()) " projects." }
    });
    section.add_plot(plot);
    finish(new_report(config, "Metric distributions"), section, config)
}

/// Budget and schedule history of one project.
pub fn trend_report(
    changes: &Path,
    projects: &Path,
    pid: i64,
    interval: Option<i32>,
    config: &PlotConfig,
) -> Result<Report> {
    let trend_data = read_change_records(changes)
        .with_context(|| format!("Failed to read change records: {}", changes.display()))?;
    let pid_data = read_project_records(projects)
        .with_context(|| format!("Failed to read project records: {}", projects.display()))?;
    let plot = plot_change_trend(&trend_data, &pid_data, pid, interval)?;

    let mut section = ReportSection::new(&format!("PID {}", pid));
    if let Some(year) = interval {
        section.add_content(html! { p { "Change years up to " (year) "." } });
    }
    section.add_plot(plot);
    finish(new_report(config, "Project change trend"), section, config)
}

/// Original vs. scaled budget and duration.
pub fn scaled_report(original: &Path, scaled: &Path, descr: &str, config: &PlotConfig) -> Result<Report> {
    let x = read_numeric(original)?;
    let x_scaled = read_numeric(scaled)?;
    let plot = plot_bdgt_sched_scaled(
        &x,
        &x_scaled,
        descr,
        None,
        None,
        &BudgetScheduleColumns::default(),
    )?;

    let mut section = ReportSection::new("Scaling");
    section.add_plot(plot);
    finish(new_report(config, "Scaled budget and duration"), section, config)
}

/// Predicted vs. true values of a two-output model.
pub fn true_pred_report(
    y_true: &Path,
    y_pred: &Path,
    descr: &str,
    dataset: Dataset,
    config: &PlotConfig,
) -> Result<Report> {
    let truth = read_numeric(y_true)?;
    let pred = read_numeric(y_pred)?;
    let label = |i: usize| truth.columns().get(i).map(|c| c.replace('_', " "));
    let opts = TruePredOptions {
        dataset,
        model_descr: Some(descr.to_string()),
        y1_label: label(0),
        y2_label: label(1),
    };
    let plots = plot_true_pred_arrays(&truth, &pred, &opts)?;

    let mut section = ReportSection::new(&format!("{} predictions", dataset.title_label()));
    section.add_plots(plots);
    finish(new_report(config, "Predictions"), section, config)
}

/// Coefficient estimates of linear models stored as a JSON list of
/// per-output coefficient summaries.
pub fn coefficients_report(json: &Path, descr: &str, config: &PlotConfig) -> Result<Report> {
    let content = std::fs::read_to_string(json)
        .with_context(|| format!("Failed to read coefficients: {}", json.display()))?;
    let models: Vec<CoefficientSummary> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse coefficients: {}", json.display()))?;
    let y_variables = models.iter().map(|m| m.y_variable.clone()).collect();
    let n_models = models.len();
    let model_dict = ModelDict::from_models(descr, y_variables, models);
    let plot = plot_coefficients(&model_dict, &config.coefficient_style(n_models))?;

    let mut section = ReportSection::new("Coefficients");
    section.add_plot(plot);
    finish(new_report(config, "Model coefficients"), section, config)
}

/// A single image file.
pub fn image_report(path: &Path, title: &str, config: &PlotConfig) -> Result<Report> {
    let plot = plot_jpg(path, title, config.figure_sizes.image)
        .with_context(|| format!("Failed to load image: {}", path.display()))?;

    let mut section = ReportSection::new(title);
    section.add_plot(plot);
    finish(new_report(config, "Image"), section, config)
}
