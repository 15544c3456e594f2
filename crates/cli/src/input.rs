use crate::error::CliError;
use std::{
    io::{self, Read},
    path::Path,
};
use tracing::debug;

/// Reads DDL text from `path`, or from stdin when no path is given.
pub fn read_source(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Splits a schema dump into statements, dropping `--` comments outside
/// quoted literals.
pub fn statements(source: &str) -> Result<Vec<String>, CliError> {
    let stripped = sqlite_ddl::strip_comments(source);
    let statements = sqlite_ddl::split_statements(&stripped)?;
    debug!("Read {} statement(s)", statements.len());
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_from_schema_dump() {
        let source = r#"
-- generated by .schema
CREATE TABLE `users` (`id` integer, `bio` text DEFAULT 'a;b');
CREATE UNIQUE INDEX `idx_users_id`
    ON `users`(`id`);
"#;

        let statements = statements(source).unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE `users` (`id` integer, `bio` text DEFAULT 'a;b')",
                "CREATE UNIQUE INDEX `idx_users_id` ON `users`(`id`)",
            ]
        );
    }

    #[test]
    fn test_statements_keep_dashes_inside_literals() {
        let source = "CREATE TABLE t (note text DEFAULT 'first\n-- second\n'); -- done\n";

        let statements = statements(source).unwrap();
        assert_eq!(
            statements,
            vec!["CREATE TABLE t (note text DEFAULT 'first\n-- second\n')"]
        );
    }

    #[test]
    fn test_statements_unbalanced_input() {
        assert!(statements("CREATE TABLE t (a int;").is_err());
    }
}
