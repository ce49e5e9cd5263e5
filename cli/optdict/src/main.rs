//! optdict CLI: inspect, check and snapshot option schemas.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "optdict", version, about = "Declared, validated option dictionaries")]
struct Cli {
    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the declared options as a table
    Table {
        /// Schema file (.toml)
        schema: PathBuf,
        /// Value file applied before rendering
        #[arg(long)]
        values: Option<PathBuf>,
        /// Table format (text, github, rst)
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate a value file against a schema
    Check {
        /// Schema file (.toml)
        schema: PathBuf,
        /// Value file to validate
        #[arg(long)]
        values: Option<PathBuf>,
    },
    /// Print the recorder snapshot as JSON
    Snapshot {
        /// Schema file (.toml)
        schema: PathBuf,
        /// Value file applied before capture
        #[arg(long)]
        values: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install log subscriber: {e}");
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Table {
            schema,
            values,
            format,
        } => commands::table::run(&schema, values.as_deref(), format.as_deref()),

        Commands::Check { schema, values } => commands::check::run(&schema, values.as_deref()),

        Commands::Snapshot { schema, values } => {
            commands::snapshot::run(&schema, values.as_deref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_table_arguments() {
        let cli = Cli::try_parse_from([
            "optdict", "table", "newton.toml", "--values", "v.toml", "--format", "rst",
        ])
        .unwrap();
        let Commands::Table {
            schema,
            values,
            format,
        } = cli.command
        else {
            panic!("expected table command");
        };
        assert_eq!(schema, PathBuf::from("newton.toml"));
        assert_eq!(values, Some(PathBuf::from("v.toml")));
        assert_eq!(format.as_deref(), Some("rst"));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["optdict", "check", "s.toml", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn schema_is_required() {
        assert!(Cli::try_parse_from(["optdict", "snapshot"]).is_err());
    }
}
