mod commands;
mod interactive;
mod logging;

use blueprint_core::CoreError;
use clap::{ArgAction, Parser, Subcommand};
use commands::build::BuildArgs;
use commands::config::ConfigArgs;
use commands::stubs::StubsArgs;
use logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(version)]
#[command(about = "Generate API resources and model factories from a schema tree")]
struct Cli {
    /// More output on stderr (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate files from a schema tree
    Build(BuildArgs),

    /// Publish the built-in stubs for customisation
    Stubs(StubsArgs),

    /// Show the resolved configuration and where each value comes from
    Config(ConfigArgs),
}

fn main() -> Result<(), CoreError> {
    let cli = Cli::parse();

    init_logging(LoggingConfig::from_verbosity(cli.verbose, cli.log_json))?;

    match cli.command {
        Commands::Build(args) => commands::build::run(args)?,
        Commands::Stubs(args) => commands::stubs::run(args)?,
        Commands::Config(args) => commands::config::run(args)?,
    }

    Ok(())
}
