//! Statement header recognition backed by the pest grammar.

use pest::{Parser, iterators::Pair};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/sqlite_ddl.pest"]
pub(crate) struct DdlParser;

/// `CREATE TABLE [IF NOT EXISTS] <name>`; `end` is the byte offset just past
/// the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableHeader<'a> {
    pub name: Option<&'a str>,
    pub if_not_exists: bool,
    pub end: usize,
}

/// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] <name> ON <table>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexHeader<'a> {
    pub name: &'a str,
    pub table: &'a str,
    pub unique: bool,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement<'a> {
    CreateTable(TableHeader<'a>),
    CreateIndex(IndexHeader<'a>),
}

/// Recognizes the kind of statement by its header, or `None` for anything
/// outside the supported subset.
pub(crate) fn recognize(stmt: &str) -> Option<Statement<'_>> {
    if let Ok(mut pairs) = DdlParser::parse(Rule::table_header, stmt) {
        return pairs.next().map(|pair| Statement::CreateTable(table_header(pair)));
    }

    if let Ok(mut pairs) = DdlParser::parse(Rule::index_header, stmt) {
        return pairs.next().and_then(index_header).map(Statement::CreateIndex);
    }

    None
}

fn table_header(pair: Pair<'_, Rule>) -> TableHeader<'_> {
    let end = pair.as_span().end();
    let mut header = TableHeader {
        name: None,
        if_not_exists: false,
        end,
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::if_not_exists => header.if_not_exists = true,
            Rule::table_name => header.name = Some(inner.as_str()),
            _ => {}
        }
    }

    header
}

fn index_header(pair: Pair<'_, Rule>) -> Option<IndexHeader<'_>> {
    let end = pair.as_span().end();
    let mut unique = false;
    let mut name = None;
    let mut table = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::unique => unique = true,
            Rule::index_name => name = Some(inner.as_str()),
            Rule::table_name => table = Some(inner.as_str()),
            _ => {}
        }
    }

    Some(IndexHeader {
        name: name?,
        table: table?,
        unique,
        end,
    })
}
