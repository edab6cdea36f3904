use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use dynres_cli::{
    cli, commands, logging, CliError, DashboardConfig, LogFormat, EXIT_INVALID_INPUT,
};

fn main() {
    let matches = match cli::command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(EXIT_INVALID_INPUT);
        }
        Err(e) => e.exit(),
    };

    match run(&matches) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

fn run(matches: &ArgMatches) -> Result<String> {
    let Some((name, args)) = matches.subcommand() else {
        return Ok(String::new());
    };

    let config = settings(args).context("failed to load settings")?;
    logging::init(&config.log_filter, config.log_format);
    tracing::debug!("Settings: {:?}", config);

    let output = commands::execute(name, args, &config)
        .with_context(|| format!("{name} failed"))?;
    Ok(output)
}

/// Settings file, then command line flags on top
fn settings(args: &ArgMatches) -> Result<DashboardConfig, CliError> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(path) = args.get_one::<PathBuf>("data") {
        config = config.with_reference_data(path);
    }
    if let Some(filter) = args.get_one::<String>("log-filter") {
        config = config.with_log_filter(filter);
    }
    if let Some(format) = args.get_one::<String>("log-format") {
        config = config.with_log_format(format.parse::<LogFormat>()?);
    }
    Ok(config)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<CliError>())
        .map_or(EXIT_INVALID_INPUT, CliError::exit_code)
}
