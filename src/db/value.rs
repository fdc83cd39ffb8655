//! MySQL column values as nullable text.
//!
//! The result formatter deals in nullable strings only, so every MySQL type
//! is reduced to its natural text representation here. Classification into a
//! logical category happens first, then a category-specific decoder extracts
//! the value; anything the decoders cannot handle falls back to NULL rather
//! than failing the row.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo, ValueRef};

/// Logical category for MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    DateTime,
    Date,
    Time,
    Binary,
    Json,
    Bit,
    Text,
}

/// Classify a MySQL type name into a logical category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    if lower.contains("decimal") || lower.contains("numeric") {
        return TypeCategory::Decimal;
    }
    if lower == "bool" || lower == "boolean" {
        return TypeCategory::Boolean;
    }
    if lower == "bit" {
        return TypeCategory::Bit;
    }
    if lower.contains("int") || lower == "year" {
        return TypeCategory::Integer;
    }
    if lower.contains("float") || lower.contains("double") {
        return TypeCategory::Float;
    }
    // datetime/timestamp before date and time: the names overlap
    if lower == "datetime" || lower == "timestamp" {
        return TypeCategory::DateTime;
    }
    if lower == "date" {
        return TypeCategory::Date;
    }
    if lower == "time" {
        return TypeCategory::Time;
    }
    if lower == "json" {
        return TypeCategory::Json;
    }
    if lower.contains("blob") || lower.contains("binary") {
        return TypeCategory::Binary;
    }

    TypeCategory::Text
}

/// Wrapper for raw DECIMAL/NUMERIC values as strings.
/// Preserves the exact database representation.
#[derive(Debug)]
pub struct RawDecimal(pub String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

/// Render binary data as text: UTF-8 when valid, base64 otherwise.
pub fn render_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => STANDARD.encode(bytes),
    }
}

/// Extract all column values of a row as nullable text, in column order.
pub fn row_values(row: &MySqlRow) -> Vec<Option<String>> {
    (0..row.columns().len())
        .map(|idx| column_text(row, idx))
        .collect()
}

/// Extract one column value as nullable text.
pub fn column_text(row: &MySqlRow, idx: usize) -> Option<String> {
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return None,
        Err(_) => return None,
        Ok(_) => {}
    }

    let type_name = row.column(idx).type_info().name().to_string();
    match categorize_type(&type_name) {
        TypeCategory::Decimal => decode_decimal(row, idx),
        TypeCategory::Integer => decode_integer(row, idx),
        TypeCategory::Boolean => decode_boolean(row, idx),
        TypeCategory::Float => decode_float(row, idx),
        TypeCategory::DateTime => decode_datetime(row, idx),
        TypeCategory::Date => decode_date(row, idx),
        TypeCategory::Time => decode_time(row, idx),
        TypeCategory::Binary => decode_binary(row, idx),
        TypeCategory::Json => decode_json(row, idx),
        TypeCategory::Bit => decode_bit(row, idx),
        TypeCategory::Text => decode_text(row, idx),
    }
}

fn decode_decimal(row: &MySqlRow, idx: usize) -> Option<String> {
    match row.try_get::<Option<RawDecimal>, _>(idx) {
        Ok(v) => v.map(|d| d.0),
        Err(e) => {
            tracing::error!("Failed to decode DECIMAL: {:?}", e);
            None
        }
    }
}

fn decode_integer(row: &MySqlRow, idx: usize) -> Option<String> {
    if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
        return Some(v.to_string());
    }
    None
}

fn decode_boolean(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<bool>, _>(idx)
        .ok()
        .flatten()
        .map(|v| if v { "1".to_string() } else { "0".to_string() })
}

fn decode_float(row: &MySqlRow, idx: usize) -> Option<String> {
    if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
        return Some(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
        return Some(v.to_string());
    }
    None
}

fn decode_datetime(row: &MySqlRow, idx: usize) -> Option<String> {
    // DATETIME decodes naive; TIMESTAMP decodes as UTC
    if let Ok(Some(v)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return Some(v.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
        return Some(v.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    None
}

fn decode_date(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<NaiveDate>, _>(idx)
        .ok()
        .flatten()
        .map(|v| v.format("%Y-%m-%d").to_string())
}

fn decode_time(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<NaiveTime>, _>(idx)
        .ok()
        .flatten()
        .map(|v| v.format("%H:%M:%S").to_string())
}

fn decode_binary(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<Vec<u8>>, _>(idx)
        .ok()
        .flatten()
        .map(|v| render_bytes(&v))
}

fn decode_json(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<serde_json::Value>, _>(idx)
        .ok()
        .flatten()
        .map(|v| v.to_string())
}

fn decode_bit(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<u64>, _>(idx)
        .ok()
        .flatten()
        .map(|v| v.to_string())
}

fn decode_text(row: &MySqlRow, idx: usize) -> Option<String> {
    row.try_get::<Option<String>, _>(idx).ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_type_integer() {
        assert_eq!(categorize_type("INT"), TypeCategory::Integer);
        assert_eq!(categorize_type("BIGINT"), TypeCategory::Integer);
        assert_eq!(categorize_type("TINYINT UNSIGNED"), TypeCategory::Integer);
        assert_eq!(categorize_type("YEAR"), TypeCategory::Integer);
    }

    #[test]
    fn test_categorize_type_boolean_not_integer() {
        assert_eq!(categorize_type("BOOLEAN"), TypeCategory::Boolean);
    }

    #[test]
    fn test_categorize_type_decimal() {
        assert_eq!(categorize_type("DECIMAL"), TypeCategory::Decimal);
        assert_eq!(categorize_type("NUMERIC"), TypeCategory::Decimal);
    }

    #[test]
    fn test_categorize_type_temporal_overlap() {
        // DATETIME contains "date" and TIMESTAMP contains "time";
        // classification must pick the combined type first.
        assert_eq!(categorize_type("DATETIME"), TypeCategory::DateTime);
        assert_eq!(categorize_type("TIMESTAMP"), TypeCategory::DateTime);
        assert_eq!(categorize_type("DATE"), TypeCategory::Date);
        assert_eq!(categorize_type("TIME"), TypeCategory::Time);
    }

    #[test]
    fn test_categorize_type_binary_and_json() {
        assert_eq!(categorize_type("BLOB"), TypeCategory::Binary);
        assert_eq!(categorize_type("VARBINARY"), TypeCategory::Binary);
        assert_eq!(categorize_type("JSON"), TypeCategory::Json);
    }

    #[test]
    fn test_categorize_type_default_text() {
        assert_eq!(categorize_type("VARCHAR"), TypeCategory::Text);
        assert_eq!(categorize_type("ENUM"), TypeCategory::Text);
        assert_eq!(categorize_type("CHAR"), TypeCategory::Text);
    }

    #[test]
    fn test_render_bytes_utf8() {
        assert_eq!(render_bytes(b"hello"), "hello");
    }

    #[test]
    fn test_render_bytes_invalid_utf8_base64() {
        assert_eq!(render_bytes(&[0xFF, 0xFE, 0x00, 0x01]), "//4AAQ==");
    }
}
