use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clarityai", version, about = "AI analysis backend for Clarity smart contracts on Stacks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Run the local heuristic pre-filter on a contract source file
    Check(CheckArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Clarity source file
    pub file: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
