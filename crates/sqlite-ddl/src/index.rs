//! Lightweight reading of `CREATE [UNIQUE] INDEX` statements.

use crate::{
    error::DdlError,
    ident::unquote,
    parser::{Statement, recognize},
    splitter::{bracketed, split},
    tokens::tokenize,
};
use serde::Serialize;

/// The parts of an index statement that matter for column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDef {
    pub name: String,
    pub table: String,
    pub unique: bool,
    /// Indexed columns, unquoted. Expression entries are kept verbatim.
    pub columns: Vec<String>,
    /// The index carries a `WHERE` clause.
    pub partial: bool,
}

impl IndexDef {
    pub fn parse(stmt: &str) -> Result<Self, DdlError> {
        let Some(Statement::CreateIndex(header)) = recognize(stmt) else {
            return Err(DdlError::UnsupportedStatement(stmt.to_string()));
        };

        let Some((body, tail)) = bracketed(&stmt[header.end..])? else {
            return Err(DdlError::NoBrackets(stmt.to_string()));
        };

        let columns = split(body)?
            .iter()
            .map(|entry| index_column(entry))
            .collect();

        let partial = tokenize(tail)
            .first()
            .is_some_and(|t| t.is_keyword("WHERE"));

        Ok(IndexDef {
            name: unquote(header.name),
            table: unquote(header.table),
            unique: header.unique,
            columns,
            partial,
        })
    }

    /// The single column this index makes unique: a unique, non-partial index
    /// over exactly one column.
    pub fn unique_column(&self) -> Option<&str> {
        match self.columns.as_slice() {
            [column] if self.unique && !self.partial => Some(column),
            _ => None,
        }
    }

    pub fn is_on(&self, table: &str) -> bool {
        self.table.eq_ignore_ascii_case(table)
    }
}

fn index_column(entry: &str) -> String {
    let tokens = tokenize(entry);
    match tokens.as_slice() {
        [_, second, ..] if second.is_group() => entry.to_string(),
        [first, ..] => unquote(first.text),
        [] => String::new(),
    }
}
