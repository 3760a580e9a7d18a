mod models;
mod persist;
mod report;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    init_logging(&data_dir)?;

    let mut store = store::Store::open(&data_dir.join("transactions.json"))?;

    match args.len() {
        1 => run::as_tui(&mut store),
        2.. => run::as_cli(&args, &mut store),
        _ => {
            eprintln!("Usage: budgetwow [command]");
            Ok(())
        }
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budgetwow", "BudgetWOW")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Logs go to a file; stdout belongs to the TUI.
fn init_logging(data_dir: &std::path::Path) -> Result<()> {
    let log_path = data_dir.join("budgetwow.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
