//! Statement execution.
//!
//! The executor runs exactly one [`Statement`] against a [`DbConnection`] and
//! reports whether the statement produced a row-set object at all:
//! - `Ok(None)`: no row set (DDL, DML, `ATTACH` ...)
//! - `Ok(Some(rows))`: a row set, possibly empty
//!
//! # Architecture
//!
//! Database-specific implementations live in submodules:
//! - `sqlite`: row-set detection through the prepared statement's columns
//! - `teradata`: ODBC cursor presence (feature `teradata`)

use crate::db::connection::DbConnection;
use crate::error::DbResult;
use crate::models::{RowSet, Statement};
use std::time::Instant;
use tracing::debug;

/// Execute a statement on an exclusively borrowed connection.
pub async fn execute(conn: &mut DbConnection, stmt: &Statement) -> DbResult<Option<RowSet>> {
    let start = Instant::now();
    debug!(sql = %stmt.sql, params = stmt.params.len(), "Executing statement");

    let result = match conn {
        DbConnection::SQLite(c) => sqlite::execute(c, stmt).await,
        #[cfg(feature = "teradata")]
        DbConnection::Teradata(c) => teradata::execute(c, stmt),
    }?;

    debug!(
        rows = ?result.as_ref().map(RowSet::len),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Statement finished"
    );
    Ok(result)
}

// =============================================================================
// Database-Specific Implementations
// =============================================================================

mod sqlite {
    use super::*;
    use crate::db::types::sqlite::decode_row;
    use sqlx::sqlite::{SqliteArguments, SqliteConnection, SqliteRow};
    use sqlx::{Column, Executor, Statement as _};

    pub async fn execute(
        conn: &mut SqliteConnection,
        stmt: &Statement,
    ) -> DbResult<Option<RowSet>> {
        let columns: Vec<String> = {
            let prepared = (&mut *conn).prepare(stmt.sql.as_str()).await?;
            prepared
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        };
        if columns.is_empty() {
            execute_raw(conn, stmt).await?;
            return Ok(None);
        }

        let rows = fetch_rows(conn, stmt).await?;
        let rows = rows.iter().map(decode_row).collect::<DbResult<Vec<_>>>()?;
        Ok(Some(RowSet::new(columns, rows)))
    }

    async fn fetch_rows(conn: &mut SqliteConnection, stmt: &Statement) -> DbResult<Vec<SqliteRow>> {
        // When params is empty, use raw SQL to avoid prepared statement issues
        let rows = if stmt.params.is_empty() {
            (&mut *conn).fetch_all(stmt.sql.as_str()).await?
        } else {
            bind_params(sqlx::query(&stmt.sql), &stmt.params)
                .fetch_all(&mut *conn)
                .await?
        };
        Ok(rows)
    }

    async fn execute_raw(conn: &mut SqliteConnection, stmt: &Statement) -> DbResult<u64> {
        let result = if stmt.params.is_empty() {
            (&mut *conn).execute(stmt.sql.as_str()).await?
        } else {
            bind_params(sqlx::query(&stmt.sql), &stmt.params)
                .execute(&mut *conn)
                .await?
        };
        Ok(result.rows_affected())
    }

    fn bind_params<'q>(
        mut query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
        params: &'q [String],
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
        for param in params {
            query = query.bind(param.as_str());
        }
        query
    }
}

#[cfg(feature = "teradata")]
mod teradata {
    use super::*;
    use crate::db::connection::teradata::TeradataConnection;
    use crate::db::types::{TypeCategory, scalar_from_text};
    use crate::models::{Row, ScalarValue};
    use odbc_api::buffers::TextRowSet;
    use odbc_api::{Cursor, DataType, IntoParameter, ResultSetMetadata};

    const BATCH_SIZE: usize = 1000;
    const MAX_TEXT_LEN: usize = 65536;

    pub fn execute(conn: &mut TeradataConnection, stmt: &Statement) -> DbResult<Option<RowSet>> {
        tokio::task::block_in_place(|| run(conn, stmt))
    }

    fn run(conn: &mut TeradataConnection, stmt: &Statement) -> DbResult<Option<RowSet>> {
        let params: Vec<_> = stmt
            .params
            .iter()
            .map(|p| p.as_str().into_parameter())
            .collect();

        let Some(mut cursor) = conn.inner.execute(&stmt.sql, params.as_slice(), None)? else {
            return Ok(None);
        };

        let columns = cursor.column_names()?.collect::<Result<Vec<String>, _>>()?;
        let mut categories = Vec::with_capacity(columns.len());
        for idx in 1..=columns.len() {
            categories.push(categorize(cursor.col_data_type(idx as u16)?));
        }

        let buffer = TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_TEXT_LEN))?;
        let mut row_set_cursor = cursor.bind_buffer(buffer)?;

        let mut rows: Vec<Row> = Vec::new();
        while let Some(batch) = row_set_cursor.fetch()? {
            for row_index in 0..batch.num_rows() {
                let row = categories
                    .iter()
                    .enumerate()
                    .map(|(col_index, category)| {
                        decode_cell(*category, batch.at(col_index, row_index))
                    })
                    .collect();
                rows.push(row);
            }
        }
        Ok(Some(RowSet::new(columns, rows)))
    }

    /// Decode one cell of the text buffer; `None` is SQL NULL.
    fn decode_cell(category: TypeCategory, cell: Option<&[u8]>) -> ScalarValue {
        match cell {
            None => ScalarValue::Null,
            Some(bytes) => scalar_from_text(category, &String::from_utf8_lossy(bytes)),
        }
    }

    fn categorize(data_type: DataType) -> TypeCategory {
        match data_type {
            DataType::TinyInt { .. }
            | DataType::SmallInt { .. }
            | DataType::Integer { .. }
            | DataType::BigInt { .. } => TypeCategory::Integer,
            DataType::Decimal { .. } | DataType::Numeric { .. } => TypeCategory::Decimal,
            DataType::Float { .. } | DataType::Real { .. } | DataType::Double { .. } => {
                TypeCategory::Float
            }
            DataType::Date { .. } => TypeCategory::Date,
            DataType::Time { .. } => TypeCategory::Time,
            DataType::Timestamp { .. } => TypeCategory::Timestamp,
            DataType::Binary { .. }
            | DataType::Varbinary { .. }
            | DataType::LongVarbinary { .. } => TypeCategory::Binary,
            _ => TypeCategory::Text,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::num::NonZeroUsize;

        #[test]
        fn test_categorize_numeric_types() {
            assert_eq!(categorize(DataType::TinyInt), TypeCategory::Integer);
            assert_eq!(categorize(DataType::Integer), TypeCategory::Integer);
            assert_eq!(categorize(DataType::BigInt), TypeCategory::Integer);
            assert_eq!(
                categorize(DataType::Decimal {
                    precision: 18,
                    scale: 2
                }),
                TypeCategory::Decimal
            );
            assert_eq!(
                categorize(DataType::Numeric {
                    precision: 5,
                    scale: 0
                }),
                TypeCategory::Decimal
            );
            assert_eq!(categorize(DataType::Double), TypeCategory::Float);
            assert_eq!(
                categorize(DataType::Float { precision: 53 }),
                TypeCategory::Float
            );
        }

        #[test]
        fn test_categorize_temporal_and_binary_types() {
            assert_eq!(categorize(DataType::Date), TypeCategory::Date);
            assert_eq!(
                categorize(DataType::Time { precision: 0 }),
                TypeCategory::Time
            );
            assert_eq!(
                categorize(DataType::Timestamp { precision: 6 }),
                TypeCategory::Timestamp
            );
            assert_eq!(
                categorize(DataType::Varbinary {
                    length: NonZeroUsize::new(64)
                }),
                TypeCategory::Binary
            );
        }

        #[test]
        fn test_categorize_everything_else_as_text() {
            assert_eq!(
                categorize(DataType::Varchar {
                    length: NonZeroUsize::new(30)
                }),
                TypeCategory::Text
            );
            assert_eq!(categorize(DataType::Unknown), TypeCategory::Text);
            assert_eq!(categorize(DataType::Bit), TypeCategory::Text);
        }

        #[test]
        fn test_decode_cell() {
            assert_eq!(decode_cell(TypeCategory::Integer, None), ScalarValue::Null);
            assert_eq!(
                decode_cell(TypeCategory::Integer, Some(b"42")),
                ScalarValue::Integer(42)
            );
            assert_eq!(
                decode_cell(TypeCategory::Decimal, Some(b"10.50")),
                ScalarValue::Decimal("10.50".to_string())
            );
            assert_eq!(
                decode_cell(TypeCategory::Date, Some(b"2024-01-31")),
                ScalarValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            );
            // Unparsable text is kept as text
            assert_eq!(
                decode_cell(TypeCategory::Integer, Some(b"n/a")),
                ScalarValue::Text("n/a".to_string())
            );
        }
    }
}
