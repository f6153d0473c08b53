// OkoView - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Headless listing/export, or the eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can
// use `crate::app::...`, `crate::core::...` etc.
pub use okoview::app;

pub use okoview::core;
pub use okoview::platform;
pub use okoview::ui;
pub use okoview::util;

use crate::app::catalog::LogCatalog;
use crate::core::model::ScanOutcome;
use crate::core::table::SortOrder;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

/// OkoView - Viewer for the daily CSV logs of a pellet-heating controller.
///
/// Point OkoView at the directory the controller writes its `CMyymmdd.csv`
/// files to and browse them by date.
#[derive(Parser, Debug)]
#[command(name = "OkoView", version, about)]
struct Cli {
    /// Log directory to scan (falls back to [catalog] directory in config.toml).
    path: Option<PathBuf>,

    /// Print the catalogued days and exit without opening a window.
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print the rows of one day (YYYY-MM-DD) and exit.
    #[arg(long = "day", value_name = "DATE")]
    day: Option<String>,

    /// With --day, print JSON instead of semicolon CSV.
    #[arg(long = "json", requires = "day")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Scan `root` and print either the day list or one day to stdout.
fn run_headless(cli: &Cli, root: &Path) -> util::error::Result<()> {
    let cancel = AtomicBool::new(false);
    let mut catalog = LogCatalog::new();
    let outcome = catalog.scan(
        root,
        |tick| {
            tracing::trace!(
                file = %tick.path.display(),
                processed = tick.processed,
                total = tick.total,
                "Scan progress"
            );
        },
        &cancel,
    )?;
    let report = match outcome {
        ScanOutcome::Completed(report) => report,
        ScanOutcome::Cancelled { processed, total } => {
            tracing::warn!(processed, total, "Scan cancelled");
            return Ok(());
        }
    };

    for skipped in &report.skipped {
        eprintln!("skipped: {}", skipped.error);
    }

    match cli.day.as_deref() {
        Some(date) => {
            let day = catalog.load_day(date)?;
            for rejected in &day.rejected {
                eprintln!("rejected: {rejected}");
            }
            let stdout = std::io::stdout().lock();
            let target = Path::new("<stdout>");
            if cli.json {
                crate::core::export::export_json(&day, stdout, target)?;
                println!();
            } else {
                crate::core::export::export_csv(&day, stdout, target)?;
            }
        }
        None => {
            for entry in &report.entries {
                println!("{}\t{}", entry.key(), entry.path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Config is read before tracing starts so its [logging] level can apply.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_file());

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "OkoView starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let directory = cli.path.clone().or_else(|| config.log_directory.clone());

    if cli.list || cli.day.is_some() {
        let Some(root) = directory else {
            eprintln!("Error: no log directory given and none configured in config.toml");
            std::process::exit(2);
        };
        if let Err(e) = run_headless(&cli, &root) {
            tracing::error!(error = %e, "Headless run failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let sort_order = if config.sort_descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let mut state = app::state::AppState::new(config.dark_mode, sort_order, cli.debug);
    state.config_warnings = config_warnings;

    // Scan the CLI/configured directory on the first frame.
    state.pending_scan = directory;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(util::constants::WINDOW_SIZE)
            .with_min_inner_size(util::constants::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::OkoViewApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch OkoView GUI: {e}");
        std::process::exit(1);
    }
}
