use sqlite_ddl::DdlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the DDL input: {0}")]
    InputRead(#[from] std::io::Error),

    #[error("Failed to parse the DDL: {0}")]
    Ddl(#[from] DdlError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Invalid output format provided: {0}")]
    InvalidOutputFormat(String),

    #[error("Constraint not found: {0}")]
    ConstraintNotFound(String),
}
