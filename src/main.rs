use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use opstrack::cli::{Cli, repl};
use opstrack::config::Config;
use opstrack::session::{Action, Session};

fn setup_logging(default_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opstrack")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("opstrack.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let env = env_logger::Env::default().default_filter_or(default_level.unwrap_or("info"));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: Config) -> Result<()> {
    info!("Starting application");
    colored::control::set_override(config.display.color);

    let preload = cli.import.clone().or_else(|| config.import.preload.clone());
    let mut session = Session::new(config);

    if let Some(path) = preload {
        match session.apply(Action::Import(path.clone())) {
            Ok(outcome) => println!("{}", outcome.message().green()),
            Err(e) => {
                warn!("Preload of {} failed: {}", path.display(), e);
                println!("{}", e.to_string().red());
            }
        }
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    repl::run(&mut session, stdin.lock(), &mut stdout, interactive).context("Session I/O failed")?;

    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging once the configured level is known
    setup_logging(cli.log_level(config.log_level.as_deref())).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, config).context("Application failed")?;

    Ok(())
}
