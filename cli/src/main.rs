mod arg_parser;
mod client_cli;

use arg_parser::{ArgParser, SubCommand};
use client_cli::ClientCli;
use playground::Config;

use clap::Parser;
use std::{error, process};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>> {
    // logs go to stderr so program output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = ArgParser::parse();
    let config = build_config(&args)?;
    let client = ClientCli::connect(config)?;

    let ok = match args.sub_command {
        SubCommand::Run { file, example } => match (file, example) {
            (Some(path), _) => {
                let source = tokio::fs::read_to_string(&path).await?;
                client.run_once(source).await
            }
            (None, Some(key)) => client.run_example(&key).await?,
            (None, None) => client.run_stdin().await?,
        },
        SubCommand::Examples => {
            client.list_examples();
            true
        }
        SubCommand::Health => client.check_health().await,
        SubCommand::Watch => {
            client.watch_health().await?;
            true
        }
        SubCommand::Session => {
            client.interactive().await?;
            true
        }
    };

    if !ok {
        process::exit(1);
    }
    Ok(())
}

fn build_config(args: &ArgParser) -> Result<Config, Box<dyn error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.execute_timeout_ms = Some(timeout_ms);
    }
    if let Some(interval_ms) = args.health_interval_ms {
        config.health_interval_ms = interval_ms;
    }
    Ok(config)
}
