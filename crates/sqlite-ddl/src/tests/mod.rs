use crate::column::ColumnMeta;


/// A nullable column with no flags, length or default.
fn col(name: &str, data_type: &str) -> ColumnMeta {
    ColumnMeta {
        name: name.into(),
        data_type: data_type.into(),
        column_type: data_type.into(),
        nullable: true,
        ..Default::default()
    }
}

fn not_null(mut meta: ColumnMeta) -> ColumnMeta {
    meta.nullable = false;
    meta
}

fn sized(mut meta: ColumnMeta, length: i64) -> ColumnMeta {
    meta.column_type = format!("{}({length})", meta.data_type);
    meta.length = Some(length);
    meta
}

fn with_default(mut meta: ColumnMeta, value: &str) -> ColumnMeta {
    meta.default_value = Some(value.into());
    meta
}
