//! Teradata column type codes.
//!
//! `dbc.ColumnsV.ColumnType` stores a one- or two-character code per column.
//! [`TypeCodeTable`] maps those codes to SQL type names and renders the same
//! table as an inline `CASE` expression for catalog queries, so both paths
//! share one source of truth.

/// Prefix of the fallback produced for codes missing from the table.
pub const UNKNOWN_TYPE: &str = "UNKNOWN";

const TYPE_CODES: &[(&str, &str)] = &[
    ("++", "TD_ANYTYPE"),
    ("A1", "UDT"),
    ("AT", "TIME"),
    ("BF", "BYTE"),
    ("BO", "BLOB"),
    ("BV", "VARBYTE"),
    ("CF", "CHAR"),
    ("CO", "CLOB"),
    ("CV", "VARCHAR"),
    ("D", "DECIMAL"),
    ("DA", "DATE"),
    ("DH", "INTERVAL DAY TO HOUR"),
    ("DM", "INTERVAL DAY TO MINUTE"),
    ("DS", "INTERVAL DAY TO SECOND"),
    ("DY", "INTERVAL DAY"),
    ("F", "FLOAT"),
    ("HM", "INTERVAL HOUR TO MINUTE"),
    ("HR", "INTERVAL HOUR"),
    ("HS", "INTERVAL HOUR TO SECOND"),
    ("I1", "BYTEINT"),
    ("I2", "SMALLINT"),
    ("I8", "BIGINT"),
    ("I", "INTEGER"),
    ("MI", "INTERVAL MINUTE"),
    ("MO", "INTERVAL MONTH"),
    ("MS", "INTERVAL MINUTE TO SECOND"),
    ("N", "NUMBER"),
    ("PD", "PERIOD(DATE)"),
    ("PM", "PERIOD(TIMESTAMP WITH TIME ZONE)"),
    ("PS", "PERIOD(TIMESTAMP)"),
    ("PT", "PERIOD(TIME)"),
    ("PZ", "PERIOD(TIME WITH TIME ZONE)"),
    ("SC", "INTERVAL SECOND"),
    ("SZ", "TIMESTAMP WITH TIME ZONE"),
    ("TS", "TIMESTAMP"),
    ("TZ", "TIME WITH TIME ZONE"),
    ("UT", "UDT"),
    ("YM", "INTERVAL YEAR TO MONTH"),
    ("YR", "INTERVAL YEAR"),
    ("AN", "UDT"),
    ("XM", "XML"),
    ("JN", "JSON"),
    ("DT", "DATASET"),
    ("??", "ST_GEOMETRY"),
];

/// Static, immutable mapping from Teradata type codes to SQL type names.
pub struct TypeCodeTable;

impl TypeCodeTable {
    /// All `(code, type name)` entries in catalog order.
    pub fn entries() -> &'static [(&'static str, &'static str)] {
        TYPE_CODES
    }

    /// Look up a type code by exact, case-sensitive match.
    ///
    /// Trailing blanks are ignored since `ColumnType` is a padded `CHAR(2)`.
    /// Codes missing from the table yield `UNKNOWN(<code>)`.
    pub fn lookup(code: &str) -> String {
        let code = code.trim_end();
        TYPE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| Self::unknown(code))
    }

    /// The fallback sentinel for an unmapped code.
    pub fn unknown(code: &str) -> String {
        format!("{UNKNOWN_TYPE}({code})")
    }

    /// Render the table as a SQL `CASE` expression over `column`.
    ///
    /// The `ELSE` branch mirrors [`TypeCodeTable::unknown`].
    pub fn case_expression(column: &str) -> String {
        let mut sql = format!("CASE TRIM({column})");
        for (code, name) in TYPE_CODES {
            sql.push_str(&format!(
                " WHEN {} THEN {}",
                sql_literal(code),
                sql_literal(name)
            ));
        }
        sql.push_str(&format!(
            " ELSE '{UNKNOWN_TYPE}(' || TRIM({column}) || ')' END"
        ));
        sql
    }
}

fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_codes() {
        assert_eq!(TypeCodeTable::lookup("CV"), "VARCHAR");
        assert_eq!(TypeCodeTable::lookup("DA"), "DATE");
        assert_eq!(TypeCodeTable::lookup("I8"), "BIGINT");
        assert_eq!(TypeCodeTable::lookup("PM"), "PERIOD(TIMESTAMP WITH TIME ZONE)");
        assert_eq!(TypeCodeTable::lookup("++"), "TD_ANYTYPE");
    }

    #[test]
    fn test_lookup_single_character_codes() {
        assert_eq!(TypeCodeTable::lookup("D"), "DECIMAL");
        assert_eq!(TypeCodeTable::lookup("I"), "INTEGER");
        // CHAR(2) padding as stored by the catalog
        assert_eq!(TypeCodeTable::lookup("F "), "FLOAT");
    }

    #[test]
    fn test_lookup_unknown_code_returns_sentinel() {
        assert_eq!(TypeCodeTable::lookup("ZZ"), "UNKNOWN(ZZ)");
        assert_eq!(TypeCodeTable::lookup(""), "UNKNOWN()");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(TypeCodeTable::lookup("cv"), "UNKNOWN(cv)");
        assert_eq!(TypeCodeTable::lookup("Da"), "UNKNOWN(Da)");
    }

    #[test]
    fn test_lookup_has_no_prefix_matching() {
        assert_eq!(TypeCodeTable::lookup("CVX"), "UNKNOWN(CVX)");
        assert_eq!(TypeCodeTable::lookup("I9"), "UNKNOWN(I9)");
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = TypeCodeTable::entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), TypeCodeTable::entries().len());
    }

    #[test]
    fn test_case_expression_covers_every_entry() {
        let sql = TypeCodeTable::case_expression("cv.ColumnType");
        assert!(sql.starts_with("CASE TRIM(cv.ColumnType)"));
        for (code, name) in TypeCodeTable::entries() {
            assert!(sql.contains(&format!("WHEN '{code}' THEN '{name}'")));
        }
        assert!(sql.ends_with("ELSE 'UNKNOWN(' || TRIM(cv.ColumnType) || ')' END"));
    }
}
