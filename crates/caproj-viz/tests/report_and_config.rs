//! Integration tests for HTML output, reports and plot configuration.

use caproj_viz::config::{load_config, PlotConfig};
use caproj_viz::plots::{plot_line, FigSize};
use caproj_viz::render::{figure_layout, save_html};
use caproj_viz::report::{Report, ReportSection};
use maud::html;

fn line() -> plotly::Plot {
    plot_line(&[1.0, 2.0, 3.0], &[2.0, 4.0, 3.0], "Forecast", "year", "USD", 3.5).unwrap()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn save_html_writes_standalone_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("line.html");
    save_html(&line(), &path).unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("Forecast"));
}

#[test]
fn figure_layout_sets_size_and_title() {
    let layout = figure_layout(FigSize::new(16.0, 12.0), "Site photo");
    let v = serde_json::to_value(&layout).unwrap();
    assert_eq!(v["width"], 1600);
    assert_eq!(v["height"], 1200);
    assert_eq!(v["title"]["text"], "Site photo");
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn report_embeds_every_plot_once_with_unique_ids() {
    let mut section = ReportSection::new("Overview");
    section.add_content(html! { p { "Budget history of PID 7." } });
    section.add_plot(line());
    section.add_plots(vec![line(), line()]);
    assert_eq!(section.plot_count(), 3);

    let mut report = Report::new("caproj", "0.1.0", None, "Capital Projects Report");
    report.add_section(section);
    report.add_section(ReportSection::new("Configuration"));
    assert_eq!(report.sections().len(), 2);

    let page = report.render().into_string();
    assert_eq!(page.matches("cdn.plot.ly").count(), 1);
    assert!(page.contains("plot-0-1"));
    assert!(page.contains("plot-0-3"));
    assert!(page.contains("Budget history of PID 7."));
    assert!(page.contains("<h2>Configuration</h2>"));
}

#[test]
fn report_saves_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.html");
    let mut report = Report::new("caproj", "0.1.0", Some("logo.png"), "Trend");
    let mut section = ReportSection::new("Trend");
    section.add_plot(line());
    report.add_section(section);
    report.save_to_file(&path).unwrap();

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("logo.png"));
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

#[test]
fn config_defaults_match_chart_defaults() {
    let cfg = PlotConfig::default();
    assert_eq!(cfg.hist_bins, 20);
    assert!(!cfg.y_log);
    assert_eq!(cfg.figure_sizes.value_counts, FigSize::new(9.0, 3.0));
    assert_eq!(cfg.value_counts_style().color, "tab:blue");
    assert_eq!(cfg.coefficient_style(3).subplots, (2, 2));
    assert_eq!(cfg.coefficient_style(0).subplots, (1, 2));
}

#[test]
fn partial_config_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot_config.json");
    std::fs::write(&path, r#"{ "hist_bins": 8, "figure_sizes": { "line_height": 5.0 } }"#).unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.hist_bins, 8);
    assert_eq!(cfg.hist_style().bins, 8);
    assert!((cfg.figure_sizes.line_height - 5.0).abs() < 1e-12);
    assert!((cfg.figure_sizes.barplot_height - 6.0).abs() < 1e-12);
    assert_eq!(cfg.bar_color, "tab:blue");
}

#[test]
fn config_round_trips_json() {
    let cfg = PlotConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: PlotConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, back);
}

#[test]
fn malformed_config_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ hist_bins: }").unwrap();
    assert!(matches!(load_config(&path), Err(caproj_viz::VizError::Json(_))));
}
