//! Column metadata extraction from a single column-definition clause.

use crate::{
    error::DdlError,
    ident::unquote,
    tokens::{Token, TokenKind, tokenize},
};
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashSet;

lazy_static! {
    /// Words that end a type name or a `DEFAULT` value.
    static ref MODIFIER_KEYWORDS: HashSet<&'static str> = [
        "CONSTRAINT",
        "PRIMARY",
        "NOT",
        "NULL",
        "UNIQUE",
        "CHECK",
        "DEFAULT",
        "COLLATE",
        "REFERENCES",
        "GENERATED",
        "AS",
        "AUTOINCREMENT",
        "ON",
    ]
    .into_iter()
    .collect();
}

fn is_modifier(token: &Token<'_>) -> bool {
    token.kind == TokenKind::Word && MODIFIER_KEYWORDS.contains(token.text.to_uppercase().as_str())
}

/// Structural facts about one column, derived from its definition clause.
///
/// Values are only produced by parsing; to change a column, edit its clause
/// and parse again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMeta {
    pub(crate) name: String,
    pub(crate) data_type: String,
    pub(crate) column_type: String,
    pub(crate) length: Option<i64>,
    pub(crate) decimal_size: Option<(i64, i64)>,
    pub(crate) default_value: Option<String>,
    pub(crate) nullable: bool,
    pub(crate) primary_key: bool,
    pub(crate) unique: bool,
    pub(crate) auto_increment: bool,
    pub(crate) generated: bool,
}

impl ColumnMeta {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    pub fn length(&self) -> Option<i64> {
        self.length
    }

    /// `(precision, scale)` for types such as `decimal(10,2)`.
    pub fn decimal_size(&self) -> Option<(i64, i64)> {
        self.decimal_size
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// False only when the clause says `NOT NULL`; a primary key alone does
    /// not make a column non-nullable here.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn primary_key(&self) -> bool {
        self.primary_key
    }

    /// Set by an inline `UNIQUE`, a table-level `UNIQUE (col)` or a
    /// non-partial unique index over this column alone. Composite `UNIQUE`
    /// constraints and indexes leave it unset.
    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn generated(&self) -> bool {
        self.generated
    }
}

/// Extracts column metadata from a column-definition clause.
///
/// `unique_from_index` holds lowercased names of columns covered by a
/// single-column, non-partial unique index on the same table.
pub fn extract(clause: &str, unique_from_index: &HashSet<String>) -> Result<ColumnMeta, DdlError> {
    let tokens = tokenize(clause);
    let Some((name, mut rest)) = tokens.split_first() else {
        return Err(DdlError::Syntax(format!(
            "empty column definition: '{clause}'"
        )));
    };

    let mut meta = ColumnMeta {
        name: unquote(name.text),
        nullable: true,
        ..Default::default()
    };

    let type_words = rest
        .iter()
        .take_while(|t| t.kind == TokenKind::Word && !is_modifier(t))
        .count();
    if type_words > 0 {
        let mut end = rest[type_words - 1].end;
        meta.data_type = rest[..type_words]
            .iter()
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(args) = rest.get(type_words).filter(|t| t.is_group()) {
            apply_type_args(&mut meta, args.inner())?;
            end = args.end;
            rest = &rest[type_words + 1..];
        } else {
            rest = &rest[type_words..];
        }

        meta.column_type = clause[tokens[1].start..end].to_string();
    }

    scan_modifiers(&mut meta, clause, rest);

    if unique_from_index.contains(&meta.name.to_lowercase()) {
        meta.unique = true;
    }

    Ok(meta)
}

fn apply_type_args(meta: &mut ColumnMeta, args: &str) -> Result<(), DdlError> {
    let bad_length = || DdlError::BadLength {
        column: meta.name.clone(),
        args: args.to_string(),
    };

    let numbers = args
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| bad_length())?;

    match numbers.as_slice() {
        [length] => meta.length = Some(*length),
        [precision, scale] => meta.decimal_size = Some((*precision, *scale)),
        _ => return Err(bad_length()),
    }
    Ok(())
}

fn scan_modifiers(meta: &mut ColumnMeta, clause: &str, tokens: &[Token<'_>]) {
    let keyword_at = |idx: usize, keyword: &str| tokens.get(idx).is_some_and(|t| t.is_keyword(keyword));

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];

        if token.is_keyword("NOT") && keyword_at(i + 1, "NULL") {
            meta.nullable = false;
            i += 2;
        } else if token.is_keyword("PRIMARY") && keyword_at(i + 1, "KEY") {
            meta.primary_key = true;
            i += 2;
        } else if token.is_keyword("UNIQUE") {
            meta.unique = true;
            i += 1;
        } else if token.is_keyword("AUTOINCREMENT") {
            meta.auto_increment = true;
            i += 1;
        } else if token.is_keyword("GENERATED")
            || (token.is_keyword("AS") && tokens.get(i + 1).is_some_and(|t| t.is_group()))
        {
            meta.generated = true;
            i += 1;
        } else if token.is_keyword("CONSTRAINT") {
            // skip the inline constraint's name
            i += 2;
        } else if token.is_keyword("DEFAULT") && !(i > 0 && tokens[i - 1].is_keyword("SET")) {
            let start = i + 1;
            let mut end = start;
            while end < tokens.len() && !is_modifier(&tokens[end]) {
                end += 1;
            }
            // NULL is the only modifier word that is also a literal
            if end == start && keyword_at(start, "NULL") {
                end += 1;
            }
            if end > start {
                let raw = &clause[tokens[start].start..tokens[end - 1].end];
                meta.default_value = Some(default_literal(raw));
            }
            i = end;
        } else {
            i += 1;
        }
    }
}

/// Normalizes a raw `DEFAULT` value: `"x"` and `'x'` lose their quotes and
/// doubled quotes unescape, `(expr)` loses its outer parens.
fn default_literal(raw: &str) -> String {
    let tokens = tokenize(raw);
    match tokens.as_slice() {
        [single] if single.kind == TokenKind::Quoted => unquote(single.text),
        [single] if single.is_group() => default_literal(single.inner().trim()),
        _ => raw.to_string(),
    }
}

/// Name of a column clause as it may appear in an `INSERT ... SELECT` column
/// list, or `None` for generated columns, which cannot be written.
pub(crate) fn insertable_name(clause: &str) -> Option<String> {
    let tokens = tokenize(clause);
    let (name, rest) = tokens.split_first()?;

    let generated = rest.iter().enumerate().any(|(i, t)| {
        t.is_keyword("GENERATED")
            || (t.is_keyword("AS") && rest.get(i + 1).is_some_and(|n| n.is_group()))
    });

    (!generated).then(|| unquote(name.text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(clause: &str) -> ColumnMeta {
        extract(clause, &HashSet::new()).unwrap()
    }

    #[test]
    fn test_extract_basic_column() {
        let col = parse("`text` varchar(500) DEFAULT \"hello\"");
        assert_eq!(
            col,
            ColumnMeta {
                name: "text".into(),
                data_type: "varchar".into(),
                column_type: "varchar(500)".into(),
                length: Some(500),
                default_value: Some("hello".into()),
                nullable: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_extract_not_null_and_numeric_default() {
        let col = parse("`age` integer NOT NULL DEFAULT 18");
        assert_eq!(col.data_type(), "integer");
        assert_eq!(col.column_type(), "integer");
        assert_eq!(col.length(), None);
        assert_eq!(col.default_value(), Some("18"));
        assert!(!col.nullable());
    }

    #[test]
    fn test_extract_inline_flags() {
        let col = parse("id integer primary key unique");
        assert!(col.primary_key());
        assert!(col.unique());
        assert!(col.nullable());

        let col = parse("\"id\" integer  PRIMARY KEY AUTOINCREMENT");
        assert_eq!(col.name(), "id");
        assert!(col.primary_key());
        assert!(col.auto_increment());
    }

    #[test]
    fn test_extract_default_forms() {
        assert_eq!(parse("a text DEFAULT \"测试, \"").default_value(), Some("测试, "));
        assert_eq!(parse("a text DEFAULT 'it''s'").default_value(), Some("it's"));
        assert_eq!(parse("a text NOT NULL DEFAULT \"\"").default_value(), Some(""));
        assert_eq!(parse("a text DEFAULT ('x')").default_value(), Some("x"));
        assert_eq!(
            parse("a datetime DEFAULT (datetime('now'))").default_value(),
            Some("datetime('now')")
        );
        assert_eq!(parse("a numeric DEFAULT true").default_value(), Some("true"));
        assert_eq!(parse("a int DEFAULT -1 NOT NULL").default_value(), Some("-1"));
        assert_eq!(parse("a text DEFAULT NULL").default_value(), Some("NULL"));
        assert_eq!(parse("a text").default_value(), None);
    }

    #[test]
    fn test_extract_keywords_inside_default_are_ignored() {
        let col = parse("a text DEFAULT 'NOT NULL UNIQUE'");
        assert!(col.nullable());
        assert!(!col.unique());
        assert_eq!(col.default_value(), Some("NOT NULL UNIQUE"));
    }

    #[test]
    fn test_extract_decimal_and_multi_word_types() {
        let col = parse("price decimal(10, 2) NOT NULL");
        assert_eq!(col.column_type(), "decimal(10, 2)");
        assert_eq!(col.decimal_size(), Some((10, 2)));
        assert_eq!(col.length(), None);

        let col = parse("big unsigned big int");
        assert_eq!(col.data_type(), "unsigned big int");
        assert_eq!(col.column_type(), "unsigned big int");
    }

    #[test]
    fn test_extract_untyped_column() {
        let col = parse("id PRIMARY KEY");
        assert_eq!(col.data_type(), "");
        assert_eq!(col.column_type(), "");
        assert!(col.primary_key());
    }

    #[test]
    fn test_extract_generated_column() {
        let col = parse("FullName varchar(255) GENERATED ALWAYS AS (FirstName || ' ' || LastName)");
        assert!(col.generated());
        assert_eq!(insertable_name("FullName varchar(255) AS (a || b) STORED"), None);
        assert_eq!(insertable_name("`id` integer"), Some("id".to_string()));
    }

    #[test]
    fn test_extract_bad_length() {
        let err = extract("a varchar(abc)", &HashSet::new()).unwrap_err();
        assert_eq!(
            err,
            DdlError::BadLength {
                column: "a".into(),
                args: "abc".into()
            }
        );
        assert!(extract("a decimal(1,2,3)", &HashSet::new()).is_err());
        assert!(extract("a varchar()", &HashSet::new()).is_err());
    }

    #[test]
    fn test_extract_set_default_action_is_not_a_default() {
        let col = parse("`owner_id` integer REFERENCES users(id) ON DELETE SET DEFAULT NOT NULL");
        assert_eq!(col.default_value(), None);
        assert!(!col.nullable());

        let col = parse("`owner_id` integer REFERENCES users(id) ON DELETE SET DEFAULT ON UPDATE CASCADE");
        assert_eq!(col.default_value(), None);
        assert!(col.nullable());

        let col = parse("`owner_id` integer DEFAULT 0 REFERENCES users(id) ON DELETE SET DEFAULT");
        assert_eq!(col.default_value(), Some("0"));
    }

    #[test]
    fn test_extract_empty_default_keeps_following_modifiers() {
        let col = parse("a int DEFAULT NOT NULL");
        assert_eq!(col.default_value(), None);
        assert!(!col.nullable());

        let col = parse("a int DEFAULT NULL NOT NULL");
        assert_eq!(col.default_value(), Some("NULL"));
        assert!(!col.nullable());
    }

    #[test]
    fn test_extract_unique_from_index() {
        let index: HashSet<String> = ["field".to_string()].into_iter().collect();
        let col = extract("`Field` integer NOT NULL", &index).unwrap();
        assert!(col.unique());
    }
}
