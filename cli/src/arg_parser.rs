use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run programs on a remote execution service
#[derive(Debug, Parser)]
#[clap(name = "playground")]
pub struct ArgParser {
    /// Base url of the execution service, e.g. http://localhost:8080/api
    #[clap(short = 's', long = "server", env = "PLAYGROUND_SERVER")]
    pub server: Option<String>,
    /// JSON config file; flags override its values
    #[clap(short = 'c', long = "config", env = "PLAYGROUND_CONFIG")]
    pub config: Option<PathBuf>,
    /// Give up on a job after this many milliseconds
    #[clap(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,
    /// Milliseconds between health checks
    #[clap(long = "health-interval-ms")]
    pub health_interval_ms: Option<u64>,
    /// The sub-command to use
    #[clap(subcommand)]
    pub sub_command: SubCommand,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Subcommand)]
pub enum SubCommand {
    /// run a program once and print its output; reads stdin without --file or --example
    Run {
        #[clap(long, conflicts_with = "example")]
        /// file holding the program
        file: Option<PathBuf>,

        #[clap(long)]
        /// key of a bundled example
        example: Option<String>,
    },
    /// list the bundled examples
    Examples,
    /// check once whether the service is reachable
    Health,
    /// keep checking the service and print every status change
    Watch,
    /// interactive editor session
    Session,
}
