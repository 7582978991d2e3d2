use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kneeform::export::summary_rows;
use kneeform::tui::{resolve_theme, App, Theme};

const EXIT_SUCCESS: i32 = 0;
const EXIT_TERMINAL: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a commented default config file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "kneeform")]
#[command(about = "Terminal entry form for bilateral knee measurements", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/kneeform/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Color scheme (overrides the config file)
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Print the plain-text summary table to stdout after quitting
    #[arg(long)]
    print: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    if let Some(Commands::Init) = cli.command {
        if let Err(e) = kneeform::config::run_init(config_path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match kneeform::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate range overrides at startup
    if let Err(errors) = kneeform::config::validate(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Loaded {} range overrides from config", config.ranges.len());
    }

    let ranges = config.range_table();
    let theme = cli.theme.or(config.theme).unwrap_or_default();
    let colors = resolve_theme(theme);

    let export_dir = config.export_dir.clone().unwrap_or_else(default_export_dir);
    if cli.verbose {
        eprintln!("Export directory: {}", export_dir.display());
    }

    let app = App::new(ranges, colors, export_dir, cli.verbose);

    let app = match kneeform::tui::run_tui(app).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Terminal error: {}", e);
            std::process::exit(EXIT_TERMINAL);
        }
    };

    if cli.print {
        let rows = summary_rows(&app.measurements);
        let use_colors = kneeform::output::should_use_colors();
        println!("{}", kneeform::output::format_summary_table(&rows, use_colors));
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Platform data directory for file exports (~/.local/share/kneeform on
/// Linux), with a home-relative fallback.
fn default_export_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kneeform")
}
