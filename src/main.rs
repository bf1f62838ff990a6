mod classifier;
mod cleaner;
mod cli;
mod config;
mod error;
mod history;
mod logging;
mod model;
mod output;
mod registry;
mod safety;
mod scanner;
mod tui;
mod utils;

use anyhow::Result;
use cleaner::{CleanOptions, CleanResult, DeletionExecutor, Elevation, FsRemover};
use cli::{Cli, Commands, ConfidenceArg, ConfigActions, OutputFormat};
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use history::HistoryLogger;
use model::Confidence;
use output::{ScanItem, ScanResult as JsonScanResult};
use registry::InstalledAppRegistry;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, error};
use tui::App;
use utils::{format_size, home_dir};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let _guard = logging::init_logger(&config.log);

    match run(cli, config) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        None => run_tui(config, cli.dry_run)?,
        Some(Commands::Scan {
            format,
            out,
            confidence,
        }) => run_scan(&config, format, out.as_deref(), confidence)?,
        Some(Commands::Config { action }) => run_config(action, config)?,
        Some(Commands::History { limit }) => run_history(limit)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn build_executor(config: &Config, dry_run: bool, home: &Path) -> DeletionExecutor {
    let dry_run = dry_run || config.clean.dry_run_by_default;
    let elevation = if config.clean.use_elevation && !dry_run {
        Elevation::probe()
    } else {
        Elevation::none()
    };

    DeletionExecutor::new(Box::new(FsRemover), home, elevation).with_options(CleanOptions {
        dry_run,
        log_history: config.clean.log_history,
    })
}

fn run_tui(config: Config, dry_run: bool) -> Result<()> {
    let home = home_dir();
    let executor = build_executor(&config, dry_run, &home);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, home, executor);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    if let Some(clean_result) = app.session.result() {
        print_summary(clean_result, app.executor.is_dry_run());
    }

    Ok(())
}

fn print_summary(result: &CleanResult, dry_run: bool) {
    for (path, msg) in result.failed_items() {
        eprintln!("  failed: {}: {}", path.display(), msg);
    }

    let prefix = if dry_run { "[DRY-RUN] " } else { "" };
    println!(
        "{}Removed {} item(s), {} failed, freed {}",
        prefix,
        result.success_count,
        result.failed_count,
        format_size(result.total_freed)
    );
}

fn run_scan(
    config: &Config,
    format: OutputFormat,
    out: Option<&str>,
    confidence: Option<ConfidenceArg>,
) -> Result<()> {
    let start = Instant::now();
    let home = home_dir();
    let installed_count = Cell::new(0);

    let orphans = scanner::scan_residue(
        &config.scan,
        &home,
        &InstalledAppRegistry::system(&home),
        |installed| installed_count.set(installed.len()),
        |location| debug!(location = %location.path.display(), "scanning"),
    );

    let wanted: Option<Confidence> = confidence.map(Into::into);
    let items: Vec<ScanItem> = orphans
        .iter()
        .filter(|o| wanted.map_or(true, |level| o.confidence == level))
        .map(ScanItem::from)
        .collect();

    let scan_result = JsonScanResult::new(
        items,
        installed_count.get(),
        start.elapsed().as_millis() as u64,
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&scan_result)?;
            if let Some(path) = out {
                fs::write(path, &json)?;
            } else {
                println!("{}", json);
            }
        }
        OutputFormat::Human => {
            if scan_result.items.is_empty() {
                println!("No leftovers found.");
                return Ok(());
            }

            for item in &scan_result.items {
                println!(
                    "  [{:<6}] {:>10}  {}",
                    item.confidence.label(),
                    format_size(item.size_bytes),
                    item.path.display()
                );
                println!("             {} ({}), {}", item.app_name, item.reason, item.category);
            }
            println!();

            println!(
                "Total: {} items, {} (in {}ms, {} installed identifiers)",
                scan_result.total_item_count,
                format_size(scan_result.total_size_bytes),
                scan_result.scan_duration_ms,
                scan_result.installed_app_count
            );
        }
    }

    Ok(())
}

fn run_config(action: ConfigActions, mut config: Config) -> Result<()> {
    match action {
        ConfigActions::Show => {
            println!("Current configuration ({}):", Config::config_path().display());
            println!("  Size backend: {:?}", config.scan.size_backend);
            println!("  Excluded paths:");
            for path in &config.scan.excluded_paths {
                println!("    - {}", path);
            }
            println!("  Extra locations:");
            for extra in &config.scan.extra_locations {
                println!(
                    "    - {} [{}, {}]",
                    extra.path, extra.category, extra.confidence
                );
            }
            println!("  Dry run by default: {}", config.clean.dry_run_by_default);
            println!("  Log history: {}", config.clean.log_history);
            println!("  Use elevation: {}", config.clean.use_elevation);
            println!("  Log level: {}", config.log.level);
        }
        ConfigActions::AddExclude { path } => {
            if config.add_excluded_path(path.clone()) {
                config.save()?;
                println!("Added exclusion: {}", path);
            } else {
                println!("Already excluded: {}", path);
            }
        }
    }

    Ok(())
}

fn run_history(limit: usize) -> Result<()> {
    let logger = HistoryLogger::new();
    let entries = logger.read_history(Some(limit))?;

    if entries.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    println!("Last {} deletion(s):\n", entries.len());

    for entry in entries {
        println!(
            "{} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            entry.path.display()
        );
        println!("    Size: {}", format_size(entry.size));
    }

    Ok(())
}
