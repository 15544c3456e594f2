use crate::{
    error::CliError,
    output::{OutputFormat, render_report},
};
use clap::Parser;
use commands::Commands;
use sqlite_ddl::Ddl;
use std::{path::PathBuf, str::FromStr};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod input;
mod output;

#[derive(Parser)]
#[command(
    name = "sqlite-ddl",
    version = "0.1.0",
    about = "Inspect and rewrite SQLite CREATE TABLE statements"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "File holding the CREATE TABLE and CREATE INDEX statements; reads stdin when omitted"
    )]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = input::read_source(cli.input.as_deref())?;
    let statements = input::statements(&source)?;
    let mut ddl = Ddl::parse(&statements)?;

    match cli.command {
        Commands::Inspect { format } => {
            let format = OutputFormat::from_str(&format)
                .map_err(|_| CliError::InvalidOutputFormat(format.clone()))?;
            println!("{}", render_report(&ddl, format)?);
        }
        Commands::Compile => println!("{}", ddl.compile()),
        Commands::Columns => println!("{}", ddl.get_columns().join(", ")),
        Commands::AddConstraint { name, clause } => {
            info!("Adding constraint '{}' to {}", name, ddl.table_name());
            ddl.add_constraint(&name, &clause);
            println!("{}", ddl.compile());
        }
        Commands::DropConstraint { name } => {
            info!("Dropping constraint '{}' from {}", name, ddl.table_name());
            if !ddl.remove_constraint(&name) {
                return Err(CliError::ConstraintNotFound(name));
            }
            println!("{}", ddl.compile());
        }
    }

    Ok(())
}
