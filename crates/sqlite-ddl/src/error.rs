use thiserror::Error;

/// Errors raised while recognizing, splitting or extracting DDL text.
///
/// Every variant carries the offending text so callers can surface it as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DdlError {
    /// The statement has no `CREATE TABLE ... ( ... )` form.
    #[error("Malformed DDL, no brackets: {0}")]
    NoBrackets(String),

    /// Paren depth or quote state was not closed at the end of the scan.
    #[error("Malformed DDL, unbalanced delimiters: {0}")]
    UnbalancedDelimiters(String),

    /// A type declared non-numeric arguments, e.g. `varchar(abc)`.
    #[error("Malformed DDL, bad length '{args}' for column '{column}'")]
    BadLength { column: String, args: String },

    #[error("No CREATE TABLE statement found")]
    MissingCreateTable,

    #[error("More than one CREATE TABLE statement found")]
    MultipleCreateTable,

    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("Syntax error: {0}")]
    Syntax(String),
}

impl DdlError {
    /// True for the malformed-input family (no brackets, unbalanced, bad length).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DdlError::NoBrackets(_) | DdlError::UnbalancedDelimiters(_) | DdlError::BadLength { .. }
        )
    }
}
