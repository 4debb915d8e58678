//! Database-agnostic type mappings.
//!
//! Type conversion uses a two-phase approach:
//! 1. `TypeCategory` classifies column types into logical categories
//! 2. Backend-specific decoders extract the value into a [`ScalarValue`]
//!
//! Both backends share [`scalar_from_text`] for values that arrive as text
//! (ODBC text buffers, SQLite TEXT storage).

use crate::models::ScalarValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for database column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Text,
    Binary,
    Date,
    Time,
    Timestamp,
    Unknown,
}

/// Classify a declared type name into a logical category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    // Check before "int" ("interval") and "date"/"time" ("datetime")
    if lower.starts_with("interval") || lower.starts_with("period") {
        return TypeCategory::Text;
    }
    if lower.contains("timestamp") || lower.contains("datetime") {
        return TypeCategory::Timestamp;
    }
    if lower == "date" {
        return TypeCategory::Date;
    }
    if lower.starts_with("time") {
        return TypeCategory::Time;
    }

    if lower.contains("decimal") || lower.contains("numeric") || lower.starts_with("number") {
        return TypeCategory::Decimal;
    }

    if lower.contains("int") {
        return TypeCategory::Integer;
    }

    if lower.contains("float") || lower.contains("double") || lower == "real" {
        return TypeCategory::Float;
    }

    if lower.contains("blob") || lower.contains("binary") || lower.contains("byte") {
        return TypeCategory::Binary;
    }

    if lower.contains("char") || lower.contains("text") || lower.contains("clob") {
        return TypeCategory::Text;
    }

    TypeCategory::Unknown
}

// =============================================================================
// Text Decoding
// =============================================================================

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Interpret a textual cell according to its column category.
///
/// Values that do not parse as the declared category are kept as text.
pub fn scalar_from_text(category: TypeCategory, text: &str) -> ScalarValue {
    let parsed = match category {
        TypeCategory::Integer => text.trim().parse().ok().map(ScalarValue::Integer),
        TypeCategory::Float => text.trim().parse().ok().map(ScalarValue::Float),
        TypeCategory::Decimal => Some(ScalarValue::Decimal(text.trim().to_string())),
        TypeCategory::Date => NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .ok()
            .map(ScalarValue::Date),
        TypeCategory::Time => NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
            .ok()
            .map(ScalarValue::Time),
        TypeCategory::Timestamp => parse_timestamp(text.trim()).map(ScalarValue::Timestamp),
        TypeCategory::Binary => decode_hex(text.trim()).map(ScalarValue::Binary),
        TypeCategory::Text | TypeCategory::Unknown => None,
    };
    parsed.unwrap_or_else(|| ScalarValue::Text(text.to_string()))
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// ODBC renders binary columns bound as text as upper-case hex.
fn decode_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 || !text.is_ascii() {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}

// =============================================================================
// SQLite Decoder
// =============================================================================

pub mod sqlite {
    use super::*;
    use crate::error::DbResult;
    use crate::models::Row as ValueRow;
    use sqlx::sqlite::SqliteRow;
    use sqlx::{Column, Row, TypeInfo, ValueRef};

    /// Decode every column of `row` in order.
    pub fn decode_row(row: &SqliteRow) -> DbResult<ValueRow> {
        (0..row.columns().len())
            .map(|idx| decode_column(row, idx))
            .collect()
    }

    /// Decode one column using the value's storage class, refined by the
    /// declared column type.
    pub fn decode_column(row: &SqliteRow, idx: usize) -> DbResult<ScalarValue> {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(ScalarValue::Null);
        }
        let storage = raw.type_info().name().to_string();
        let declared = categorize_type(row.column(idx).type_info().name());

        let value = match storage.as_str() {
            "INTEGER" => {
                let v: i64 = row.try_get(idx)?;
                match declared {
                    TypeCategory::Decimal => ScalarValue::Decimal(v.to_string()),
                    _ => ScalarValue::Integer(v),
                }
            }
            "REAL" => {
                let v: f64 = row.try_get(idx)?;
                match declared {
                    TypeCategory::Decimal => ScalarValue::Decimal(v.to_string()),
                    _ => ScalarValue::Float(v),
                }
            }
            "BLOB" => ScalarValue::Binary(row.try_get::<Vec<u8>, _>(idx)?),
            _ => {
                let v: String = row.try_get(idx)?;
                match declared {
                    TypeCategory::Decimal
                    | TypeCategory::Date
                    | TypeCategory::Time
                    | TypeCategory::Timestamp => scalar_from_text(declared, &v),
                    _ => ScalarValue::Text(v),
                }
            }
        };
        Ok(value)
    }
}
