//! The parsed table model: ordered clauses, derived column metadata, and the
//! constraint edits that SQLite cannot do with `ALTER TABLE`.

use crate::{
    classifier::{Clause, ConstraintKind, classify},
    column::{ColumnMeta, extract, insertable_name},
    error::DdlError,
    ident::{quote_backtick, unquote},
    index::IndexDef,
    parser::{Statement, recognize},
    splitter::{bracketed, split},
};
use std::collections::HashSet;
use tracing::{debug, trace};

/// One table's DDL, parsed from a `CREATE TABLE` plus its `CREATE INDEX`
/// statements.
///
/// `fields` holds the raw clauses in their original order and is the source
/// of truth; `columns` is computed from it at parse time and never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ddl {
    table_name: String,
    if_not_exists: bool,
    fields: Vec<String>,
    columns: Vec<ColumnMeta>,
    options: Option<String>,
    indexes: Vec<IndexDef>,
}

impl Ddl {
    /// Parses exactly one `CREATE TABLE` statement and any number of
    /// `CREATE [UNIQUE] INDEX` statements, in any order.
    ///
    /// Indexes on other tables are ignored.
    pub fn parse<S: AsRef<str>>(statements: &[S]) -> Result<Self, DdlError> {
        let mut table = None;
        let mut indexes = Vec::new();

        for stmt in statements.iter().map(AsRef::as_ref) {
            match recognize(stmt) {
                Some(Statement::CreateTable(header)) => {
                    if table.replace((stmt, header)).is_some() {
                        return Err(DdlError::MultipleCreateTable);
                    }
                }
                Some(Statement::CreateIndex(_)) => indexes.push(IndexDef::parse(stmt)?),
                None => return Err(DdlError::UnsupportedStatement(stmt.to_string())),
            }
        }

        let (stmt, header) = table.ok_or(DdlError::MissingCreateTable)?;
        let rest = &stmt[header.end..];

        let Some((body, tail)) = bracketed(rest)? else {
            return Err(DdlError::NoBrackets(stmt.to_string()));
        };
        let Some(table_name) = header.name else {
            return Err(DdlError::Syntax(format!("missing table name: '{stmt}'")));
        };

        let fields = split(body)?;
        let options = table_options(tail);

        let bare_table = unquote(table_name);
        indexes.retain(|index| {
            let keep = index.is_on(&bare_table);
            if !keep {
                debug!(
                    "Ignoring index '{}' on table '{}' while parsing '{}'",
                    index.name, index.table, bare_table
                );
            }
            keep
        });

        let columns = derive_columns(&fields, &indexes)?;

        Ok(Ddl {
            table_name: table_name.to_string(),
            if_not_exists: header.if_not_exists,
            fields,
            columns,
            options,
            indexes,
        })
    }

    /// Builds a model straight from clause strings. `columns` stays empty
    /// until the compiled text is parsed again.
    pub fn from_fields(table_name: impl Into<String>, fields: Vec<String>) -> Self {
        Ddl {
            table_name: table_name.into(),
            fields,
            ..Default::default()
        }
    }

    /// Table name as written, quotes included.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    /// Trailing table options such as `WITHOUT ROWID` or `STRICT`.
    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    /// Index statements on this table that were parsed alongside it.
    pub fn indexes(&self) -> &[IndexDef] {
        &self.indexes
    }

    /// Renders the canonical `CREATE TABLE` statement.
    pub fn compile(&self) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.table_name);
        sql.push_str(" (");
        sql.push_str(&self.fields.join(", "));
        sql.push(')');
        if let Some(options) = &self.options {
            sql.push(' ');
            sql.push_str(options);
        }
        sql
    }

    /// Replaces the constraint named `name` (exact match) in place, or appends
    /// `clause` when there is none. `columns` is not recomputed.
    pub fn add_constraint(&mut self, name: &str, clause: &str) {
        let existing = self
            .fields
            .iter()
            .position(|field| classify(field).constraint_name() == Some(name));

        match existing {
            Some(idx) => {
                debug!("Replacing constraint '{name}' at position {idx}");
                self.fields[idx] = clause.to_string();
            }
            None => {
                debug!("Appending constraint '{name}'");
                self.fields.push(clause.to_string());
            }
        }
    }

    /// Removes the first constraint whose name matches `name`, ignoring case
    /// and quoting. Returns false when no such constraint exists.
    pub fn remove_constraint(&mut self, name: &str) -> bool {
        let found = self.fields.iter().position(|field| {
            classify(field)
                .constraint_name()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        });

        match found {
            Some(idx) => {
                let removed = self.fields.remove(idx);
                debug!("Removed constraint '{name}': {removed}");
                true
            }
            None => false,
        }
    }

    /// Backtick-quoted names of the writable columns, in declaration order.
    ///
    /// Names that only occur inside constraints are not included, and neither
    /// are generated columns.
    pub fn get_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| classify(field).is_column())
            .filter_map(|field| insertable_name(field))
            .map(|name| quote_backtick(&name))
            .collect()
    }
}

fn table_options(tail: &str) -> Option<String> {
    let options = tail.trim().trim_end_matches(';').trim();
    (!options.is_empty()).then(|| options.to_string())
}

fn derive_columns(fields: &[String], indexes: &[IndexDef]) -> Result<Vec<ColumnMeta>, DdlError> {
    let clauses: Vec<Clause> = fields.iter().map(|field| classify(field)).collect();

    let mut primary_keys = HashSet::new();
    let mut unique_constraints = HashSet::new();
    for (field, clause) in fields.iter().zip(&clauses) {
        trace!("Classified clause '{field}' as {clause:?}");
        if let Clause::Constraint(constraint) = clause {
            match &constraint.kind {
                ConstraintKind::PrimaryKey(cols) => {
                    primary_keys.extend(cols.iter().map(|c| c.to_lowercase()));
                }
                ConstraintKind::Unique(cols) if cols.len() == 1 => {
                    unique_constraints.insert(cols[0].to_lowercase());
                }
                _ => {}
            }
        }
    }

    let unique_from_index: HashSet<String> = indexes
        .iter()
        .filter_map(IndexDef::unique_column)
        .map(str::to_lowercase)
        .collect();

    fields
        .iter()
        .zip(&clauses)
        .filter(|(_, clause)| clause.is_column())
        .map(|(field, _)| -> Result<ColumnMeta, DdlError> {
            let mut meta = extract(field, &unique_from_index)?;
            let key = meta.name.to_lowercase();
            meta.primary_key |= primary_keys.contains(&key);
            meta.unique |= unique_constraints.contains(&key);
            Ok(meta)
        })
        .collect()
}
