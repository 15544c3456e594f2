//! Column-versus-constraint classification of table clauses.

use crate::{
    ident::unquote,
    splitter::split,
    tokens::{Token, TokenKind, tokenize},
};

/// Result of classifying one top-level clause of a table definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Column,
    Constraint(Constraint),
}

/// A table-level constraint, optionally named with `CONSTRAINT <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub name: Option<String>,
    pub kind: ConstraintKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `PRIMARY KEY (cols)`, column names unquoted.
    PrimaryKey(Vec<String>),
    ForeignKey,
    Check,
    /// `UNIQUE (cols)`, column names unquoted.
    Unique(Vec<String>),
    /// `CONSTRAINT <name>` followed by something we don't recognize.
    Generic,
}

impl Clause {
    pub fn is_column(&self) -> bool {
        matches!(self, Clause::Column)
    }

    /// Name of a `CONSTRAINT <name> ...` clause.
    pub fn constraint_name(&self) -> Option<&str> {
        match self {
            Clause::Constraint(Constraint {
                name: Some(name), ..
            }) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Classifies a clause by its leading keyword.
///
/// Only the first token(s) are inspected, and a keyword must be a whole word:
/// a clause starting with `checksum`, `constraints` or `unique_code` is a
/// column definition.
pub fn classify(clause: &str) -> Clause {
    classify_tokens(&tokenize(clause))
}

fn classify_tokens(tokens: &[Token<'_>]) -> Clause {
    let Some((first, rest)) = tokens.split_first() else {
        return Clause::Column;
    };

    if first.is_keyword("CONSTRAINT") {
        return match rest.split_first() {
            Some((name, tail)) if matches!(name.kind, TokenKind::Word | TokenKind::Quoted) => {
                let kind = match classify_tokens(tail) {
                    Clause::Constraint(inner) => inner.kind,
                    Clause::Column => ConstraintKind::Generic,
                };
                Clause::Constraint(Constraint {
                    name: Some(unquote(name.text)),
                    kind,
                })
            }
            _ => Clause::Column,
        };
    }

    let kind = match rest {
        [key, tail @ ..] if first.is_keyword("PRIMARY") && key.is_keyword("KEY") => {
            ConstraintKind::PrimaryKey(column_list(tail.first()))
        }
        [key, ..] if first.is_keyword("FOREIGN") && key.is_keyword("KEY") => {
            ConstraintKind::ForeignKey
        }
        [group, ..] if first.is_keyword("CHECK") && group.is_group() => ConstraintKind::Check,
        [group, ..] if first.is_keyword("UNIQUE") && group.is_group() => {
            ConstraintKind::Unique(column_list(Some(group)))
        }
        _ => return Clause::Column,
    };

    Clause::Constraint(Constraint { name: None, kind })
}

/// Unquoted names from a `(col [ASC|DESC], ...)` group.
pub(crate) fn column_list(group: Option<&Token<'_>>) -> Vec<String> {
    let Some(group) = group.filter(|g| g.is_group()) else {
        return Vec::new();
    };

    split(group.inner())
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| tokenize(entry).first().map(|t| unquote(t.text)))
        .collect()
}
