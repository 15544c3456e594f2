use crate::error::CliError;
use serde::Serialize;
use sqlite_ddl::{ColumnMeta, Ddl};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" | "text" => Ok(OutputFormat::Table),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Serializable view of a parsed table.
#[derive(Debug, Serialize)]
pub struct DdlReport<'a> {
    pub table_name: &'a str,
    pub fields: &'a [String],
    pub columns: &'a [ColumnMeta],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a str>,
}

impl<'a> From<&'a Ddl> for DdlReport<'a> {
    fn from(ddl: &'a Ddl) -> Self {
        DdlReport {
            table_name: ddl.table_name(),
            fields: ddl.fields(),
            columns: ddl.columns(),
            options: ddl.options(),
        }
    }
}

pub fn render_report(ddl: &Ddl, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&DdlReport::from(ddl))?),
        OutputFormat::Table => Ok(render_table(ddl)),
    }
}

fn render_table(ddl: &Ddl) -> String {
    let mut out = format!("Table {} ({} clauses)\n", ddl.table_name(), ddl.fields().len());
    out.push_str(&format!(
        "{:<20} {:<16} {:<8} {:<4} {:<6} {}\n",
        "Column", "Type", "Nullable", "PK", "Unique", "Default"
    ));
    out.push_str(&"-".repeat(64));
    out.push('\n');

    for col in ddl.columns() {
        out.push_str(&format!(
            "{:<20} {:<16} {:<8} {:<4} {:<6} {}\n",
            col.name(),
            col.column_type(),
            yes_no(col.nullable()),
            yes_no(col.primary_key()),
            yes_no(col.unique()),
            col.default_value().unwrap_or("n/a"),
        ));
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
