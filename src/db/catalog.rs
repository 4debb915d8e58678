//! Catalog statements over the Teradata `dbc` views.
//!
//! Name matching is case-insensitive: both the catalog column and the bound
//! parameter are uppercased. Results come back in engine order.
//!
//! The `*_default_*` statements back the schema resources and are scoped to
//! the default database of the login user (`dbc.UsersV.DefaultDatabase`).

use crate::db::type_codes::TypeCodeTable;
use crate::models::Statement;

/// Owner whose databases are hidden from `list_databases`.
pub const EXCLUDED_OWNER: &str = "PDCRADM";

/// Pattern used for an empty name in `describe_object`.
pub const MATCH_ALL: &str = "%";

/// All databases and users, except those owned by [`EXCLUDED_OWNER`].
pub fn list_databases_statement() -> Statement {
    Statement::new(format!(
        "SELECT DataBaseName, \
         CASE DBKind WHEN 'U' THEN 'User' WHEN 'D' THEN 'DataBase' ELSE DBKind END AS DBType, \
         CommentString \
         FROM dbc.DatabasesV dv \
         WHERE OwnerName <> '{EXCLUDED_OWNER}'"
    ))
}

/// Tables and views in `db_name`.
pub fn list_objects_statement(db_name: &str) -> Statement {
    Statement::new(
        "SELECT TableName FROM dbc.TablesV tv \
         WHERE UPPER(tv.DataBaseName) = UPPER(?) \
         AND tv.TableKind IN ('T', 'V')",
    )
    .with_param(db_name.to_uppercase())
}

/// Columns of every object matching the two `LIKE` patterns, with the
/// column type decoded in SQL.
///
/// An empty name matches everything.
pub fn describe_object_statement(db_name: &str, obj_name: &str) -> Statement {
    Statement::new(format!(
        "SELECT tv.TableName, cv.ColumnName, {} AS CType \
         FROM dbc.TablesV tv \
         JOIN dbc.ColumnsVX cv \
         ON tv.DataBaseName = cv.DataBaseName AND tv.TableName = cv.TableName \
         WHERE UPPER(tv.DataBaseName) LIKE UPPER(?) \
         AND UPPER(tv.TableName) LIKE UPPER(?)",
        TypeCodeTable::case_expression("cv.ColumnType")
    ))
    .with_param(like_pattern(db_name))
    .with_param(like_pattern(obj_name))
}

/// Tables and views in the default database of `user`.
pub fn list_default_objects_statement(user: &str) -> Statement {
    Statement::new(
        "SELECT tv.TableName FROM dbc.TablesV tv \
         JOIN dbc.UsersV uv ON UPPER(tv.DataBaseName) = UPPER(uv.DefaultDatabase) \
         WHERE UPPER(uv.UserName) = UPPER(?) \
         AND tv.TableKind IN ('T', 'V')",
    )
    .with_param(user.to_uppercase())
}

/// Columns of `table` in the default database of `user`, with decoded types.
pub fn describe_default_object_statement(user: &str, table: &str) -> Statement {
    Statement::new(format!(
        "SELECT cv.ColumnName, {} AS CType \
         FROM dbc.ColumnsVX cv \
         JOIN dbc.UsersV uv ON UPPER(cv.DataBaseName) = UPPER(uv.DefaultDatabase) \
         WHERE UPPER(uv.UserName) = UPPER(?) \
         AND UPPER(cv.TableName) = UPPER(?)",
        TypeCodeTable::case_expression("cv.ColumnType")
    ))
    .with_param(user.to_uppercase())
    .with_param(table.to_uppercase())
}

fn like_pattern(name: &str) -> String {
    if name.is_empty() {
        MATCH_ALL.to_string()
    } else {
        name.to_uppercase()
    }
}
