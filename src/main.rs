use chrono::{Datelike, Utc};
use clap::Parser;
use log::*;

use release_newsletter::{Args, Result, command};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_newsletter")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // values from .env never override the real environment
    let dotenv = dotenvy::dotenv();

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    match dotenv {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => debug!("no .env file found"),
        Err(err) => warn!("failed to load .env file: {err}"),
    }

    let now = Utc::now();
    let config = cli_args.to_config(now.year())?;

    command::execute(config, now).await?;

    Ok(())
}
