use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use caproj_viz::config::{load_config, PlotConfig};

pub fn validate_tsv_or_csv_file(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!("File must have a .tsv or .csv extension: {}", path.display()),
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

pub fn validate_existing_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    Ok(())
}

/// Load the plot configuration, or fall back to the defaults and print them
/// so they can be saved and edited.
pub fn load_plot_config(path: Option<&PathBuf>) -> Result<PlotConfig> {
    match path {
        Some(path) => {
            log::info!("[caproj] Using config: {:?}", path);
            load_config(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => {
            let config = PlotConfig::default();
            eprintln!("[caproj] No config provided; using defaults.");
            let json = serde_json::to_string_pretty(&config)?;
            eprintln!("[caproj] Default config:\n{}", json);
            Ok(config)
        }
    }
}

/// Where a subcommand's report goes: `-o` when given, otherwise
/// `caproj_<subcommand>.html` in the configured output directory.
pub fn report_path(config: &PlotConfig, subcommand: &str, output: Option<&PathBuf>) -> PathBuf {
    match output {
        Some(path) => path.clone(),
        None => config
            .output_dir
            .join(format!("caproj_{}.html", subcommand.replace('-', "_"))),
    }
}
