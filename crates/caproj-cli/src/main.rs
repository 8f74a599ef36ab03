use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use caproj_cli::commands::{
    coefficients_report, counts_report, hist_report, image_report, scaled_report,
    true_pred_report, trend_report,
};
use caproj_cli::util::{
    load_plot_config, report_path, validate_existing_file, validate_tsv_or_csv_file,
};
use caproj_viz::models::Dataset;

fn table_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn text_arg(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .help(help)
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
        .value_hint(ValueHint::Other)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("CAPROJ_LOG", "error,caproj=info"))
        .init();

    let matches = Command::new("caproj")
        .version(clap::crate_version!())
        .about("Charts for capital-project budget and schedule forecasts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Path to a JSON plot configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output")
                .global(true)
                .help("Path of the HTML report. Defaults to caproj_<subcommand>.html in the configured output directory.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("counts")
                .about("Bar chart of the value counts of one column")
                .arg(table_arg("csv", "Path to the input table (*.csv or *.tsv)"))
                .arg(text_arg("column", "column", "Column whose values are counted").required(true))
                .arg(
                    Arg::new("horizontal")
                        .long("horizontal")
                        .help("Draw horizontal bars with the column name on the y axis")
                        .action(ArgAction::SetTrue),
                )
                .arg(text_arg("title", "title", "Chart title")),
        )
        .subcommand(
            Command::new("hist")
                .about("Side-by-side histograms of two metric columns")
                .arg(table_arg("csv", "Path to the input table (*.csv or *.tsv)"))
                .arg(text_arg("metric1", "metric1", "First metric column").required(true))
                .arg(text_arg("metric2", "metric2", "Second metric column").required(true))
                .arg(
                    Arg::new("log")
                        .long("log")
                        .help("Log-scale the frequency axis")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("bins")
                        .long("bins")
                        .help("Number of histogram bins. Overrides the configuration file.")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("trend")
                .about("Budget and duration history of one project")
                .arg(table_arg("changes", "Path to the change-record table"))
                .arg(table_arg("projects", "Path to the project table"))
                .arg(
                    Arg::new("pid")
                        .long("pid")
                        .help("Project ID")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .help("Last change year to include")
                        .value_parser(clap::value_parser!(i32)),
                ),
        )
        .subcommand(
            Command::new("scaled")
                .about("Original vs. scaled budget and duration values")
                .arg(table_arg("original", "Path to the original table"))
                .arg(table_arg("scaled", "Path to the scaled table"))
                .arg(text_arg("descr", "descr", "Name of the scaling method").required(true)),
        )
        .subcommand(
            Command::new("true-pred")
                .about("Predicted vs. true values of a two-output model")
                .arg(table_arg("true", "Path to the true values (two columns)"))
                .arg(table_arg("pred", "Path to the predicted values (two columns)"))
                .arg(text_arg("descr", "descr", "Model description").required(true))
                .arg(
                    Arg::new("dataset")
                        .long("dataset")
                        .help("Which split the values come from")
                        .value_parser(["train", "test"])
                        .default_value("train"),
                ),
        )
        .subcommand(
            Command::new("coefficients")
                .about("Coefficient estimates and 95% intervals of linear models")
                .arg(table_arg("coefs", "Path to a JSON list of coefficient summaries"))
                .arg(
                    text_arg("descr", "descr", "Model description")
                        .default_value("Linear regression"),
                ),
        )
        .subcommand(
            Command::new("image")
                .about("Show an image file")
                .arg(table_arg("path", "Path to the image (*.jpg or *.png)"))
                .arg(text_arg("title", "title", "Image title").required(true)),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some((name, sub_m)) => match run(name, sub_m) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("{} failed: {:#}", name, e);
                std::process::exit(1)
            }
        },
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn path<'a>(matches: &'a ArgMatches, id: &str) -> &'a PathBuf {
    matches
        .get_one::<PathBuf>(id)
        .unwrap_or_else(|| unreachable!("{} is required", id))
}

fn text<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_else(|| unreachable!("{} is required", id))
}

fn run(name: &str, matches: &ArgMatches) -> Result<()> {
    let mut config = load_plot_config(matches.get_one::<PathBuf>("config"))?;

    let report = match name {
        "counts" => {
            let csv = path(matches, "csv");
            validate_tsv_or_csv_file(csv)?;
            counts_report(
                csv,
                text(matches, "column"),
                matches.get_flag("horizontal"),
                matches.get_one::<String>("title").map(String::as_str),
                &config,
            )?
        }
        "hist" => {
            let csv = path(matches, "csv");
            validate_tsv_or_csv_file(csv)?;
            if matches.get_flag("log") {
                config.y_log = true;
            }
            if let Some(bins) = matches.get_one::<usize>("bins") {
                config.hist_bins = *bins;
            }
            hist_report(csv, text(matches, "metric1"), text(matches, "metric2"), &config)?
        }
        "trend" => {
            let (changes, projects) = (path(matches, "changes"), path(matches, "projects"));
            validate_tsv_or_csv_file(changes)?;
            validate_tsv_or_csv_file(projects)?;
            let pid = *matches
                .get_one::<i64>("pid")
                .unwrap_or_else(|| unreachable!("pid is required"));
            let interval = matches.get_one::<i32>("interval").copied();
            trend_report(changes, projects, pid, interval, &config)?
        }
        "scaled" => {
            let (original, scaled) = (path(matches, "original"), path(matches, "scaled"));
            validate_tsv_or_csv_file(original)?;
            validate_tsv_or_csv_file(scaled)?;
            scaled_report(original, scaled, text(matches, "descr"), &config)?
        }
        "true-pred" => {
            let (y_true, y_pred) = (path(matches, "true"), path(matches, "pred"));
            validate_tsv_or_csv_file(y_true)?;
            validate_tsv_or_csv_file(y_pred)?;
            let dataset: Dataset = text(matches, "dataset").parse()?;
            true_pred_report(y_true, y_pred, text(matches, "descr"), dataset, &config)?
        }
        "coefficients" => {
            let coefs = path(matches, "coefs");
            validate_existing_file(coefs)?;
            coefficients_report(coefs, text(matches, "descr"), &config)?
        }
        "image" => {
            let image = path(matches, "path");
            validate_existing_file(image)?;
            image_report(image, text(matches, "title"), &config)?
        }
        other => unreachable!("unknown subcommand {}", other),
    };

    let out = report_path(&config, name, matches.get_one::<PathBuf>("output_file"));
    report.save_to_file(&out)?;
    eprintln!("[caproj] Report saved to {}", out.display());
    Ok(())
}
