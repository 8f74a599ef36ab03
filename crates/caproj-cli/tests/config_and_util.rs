//! Integration tests for CLI util helpers and the report builders.

use std::path::PathBuf;

use caproj_cli::commands::{hist_report, true_pred_report};
use caproj_cli::util::{load_plot_config, report_path, validate_tsv_or_csv_file};
use caproj_viz::config::PlotConfig;
use caproj_viz::models::Dataset;

// ---------------------------------------------------------------------------
// validate_tsv_or_csv_file
// ---------------------------------------------------------------------------

#[test]
fn validate_tsv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(&path).is_ok());
}

#[test]
fn validate_csv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.CSV");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(&path).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(&path).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_tsv_or_csv_file(&PathBuf::from("/nonexistent/path/data.tsv")).is_err());
}

// ---------------------------------------------------------------------------
// Config loading & output paths
// ---------------------------------------------------------------------------

#[test]
fn missing_config_falls_back_to_defaults() {
    let cfg = load_plot_config(None).unwrap();
    assert_eq!(cfg, PlotConfig::default());
}

#[test]
fn unreadable_config_errors_with_path() {
    let path = PathBuf::from("/nonexistent/config.json");
    let err = load_plot_config(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/config.json"));
}

#[test]
fn report_path_defaults_to_subcommand_name() {
    let cfg = PlotConfig {
        output_dir: PathBuf::from("out"),
        ..PlotConfig::default()
    };
    assert_eq!(
        report_path(&cfg, "true-pred", None),
        PathBuf::from("out").join("caproj_true_pred.html")
    );
    let explicit = PathBuf::from("mine.html");
    assert_eq!(report_path(&cfg, "hist", Some(&explicit)), explicit);
}

// ---------------------------------------------------------------------------
// Report builders
// ---------------------------------------------------------------------------

#[test]
fn hist_report_has_plot_and_config_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.csv");
    std::fs::write(&path, "Budget_Change,Schedule_Change,Borough\n1,0.5,Queens\n2,1.5,Bronx\n4,0.0,Queens\n").unwrap();

    let report = hist_report(&path, "Budget_Change", "Schedule_Change", &PlotConfig::default()).unwrap();
    assert_eq!(report.sections().len(), 2);
    assert_eq!(report.sections()[0].plot_count(), 1);
    assert_eq!(report.sections()[1].title(), "Configuration");
}

#[test]
fn true_pred_report_uses_column_names_as_labels() {
    let dir = tempfile::tempdir().unwrap();
    let y_true = dir.path().join("true.csv");
    let y_pred = dir.path().join("pred.csv");
    std::fs::write(&y_true, "Budget_Change,Schedule_Change\n1,10\n2,20\n3,30\n").unwrap();
    std::fs::write(&y_pred, "a,b\n1,11\n2,19\n4,30\n").unwrap();

    let report = true_pred_report(&y_true, &y_pred, "Ridge", Dataset::Test, &PlotConfig::default()).unwrap();
    assert_eq!(report.sections()[0].plot_count(), 3);
    assert_eq!(report.sections()[0].title(), "TEST predictions");
    let page = report.render().into_string();
    assert!(page.contains("Budget Change"));
}
