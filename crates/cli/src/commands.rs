use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the table name, clauses and column metadata
    Inspect {
        #[arg(
            long,
            default_value = "json",
            help = "Output format: \"json\" or \"table\""
        )]
        format: String,
    },
    /// Print the canonical CREATE TABLE statement
    Compile,
    /// Print the writable column list for INSERT ... SELECT statements
    Columns,
    /// Add or replace a named constraint and print the rewritten statement
    AddConstraint {
        #[arg(long, help = "Constraint name")]
        name: String,

        #[arg(long, help = "Full constraint clause, e.g. CONSTRAINT `fk` FOREIGN KEY ...")]
        clause: String,
    },
    /// Drop a named constraint and print the rewritten statement
    DropConstraint {
        #[arg(long, help = "Constraint name")]
        name: String,
    },
}
