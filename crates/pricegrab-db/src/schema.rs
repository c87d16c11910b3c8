//! Table descriptors and the generic statements built from them.

use pricegrab_core::{IdentityRow, ObservationRow};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::DbError;

/// A table name plus its ordered column list. Every column is `TEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// One row per SKU: the attributes that never change.
pub const IDENTITY_TABLE: TableSpec = TableSpec {
    name: "products",
    columns: &IdentityRow::COLUMNS,
};

/// One row per SKU and date.
pub const OBSERVATION_TABLE: TableSpec = TableSpec {
    name: "product_data",
    columns: &ObservationRow::COLUMNS,
};

/// Result of an insert-if-absent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row for the key was already stored; nothing was written.
    Skipped,
}

impl TableSpec {
    fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{c} TEXT"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({columns})", self.name)
    }

    fn insert_statement(&self) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.name,
            self.columns.join(", ")
        )
    }

    fn select_statement(&self, filter: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {filter} ORDER BY rowid",
            self.columns.join(", "),
            self.name
        )
    }
}

/// Create both tables if they do not exist yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
    for table in [IDENTITY_TABLE, OBSERVATION_TABLE] {
        sqlx::query(&table.create_statement()).execute(pool).await?;
    }
    Ok(())
}

/// Insert one row of positional values into `table`.
///
/// Single quotes are removed from every value before binding.
///
/// # Errors
///
/// Returns [`DbError::ShapeMismatch`] when the value count differs from the
/// column count (nothing is written), or [`DbError::Sqlx`] if the insert fails.
pub async fn insert_values(
    pool: &SqlitePool,
    table: TableSpec,
    values: &[&str],
) -> Result<(), DbError> {
    if values.len() != table.columns.len() {
        return Err(DbError::ShapeMismatch {
            table: table.name,
            expected: table.columns.len(),
            actual: values.len(),
        });
    }

    let sql = table.insert_statement();
    let mut query = sqlx::query(&sql);
    for value in values {
        query = query.bind(strip_quotes(value));
    }
    query.execute(pool).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared helpers for the per-table modules
// ---------------------------------------------------------------------------

pub(crate) fn strip_quotes(value: &str) -> String {
    value.replace('\'', "")
}

/// Number of rows in `table` whose `keys` columns equal the given values.
pub(crate) async fn count_matching(
    pool: &SqlitePool,
    table: TableSpec,
    keys: &[(&str, &str)],
) -> Result<i64, DbError> {
    let filter = keys
        .iter()
        .map(|(column, _)| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {filter}", table.name);

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for (_, value) in keys {
        query = query.bind(strip_quotes(value));
    }
    Ok(query.fetch_one(pool).await?)
}

/// Interprets a presence count for a key expected to be unique. Anything
/// other than zero counts as present; more than one row is logged.
pub(crate) fn is_present(count: i64, table: TableSpec, key: &str) -> bool {
    match count {
        0 => false,
        1 => true,
        n => {
            tracing::warn!(
                table = table.name,
                key,
                rows = n,
                "expected at most one row; treating as present"
            );
            true
        }
    }
}

/// All rows of `table` matching `filter` (one `?` placeholder bound to
/// `value`), in insertion order, as positional strings.
pub(crate) async fn select_rows(
    pool: &SqlitePool,
    table: TableSpec,
    filter: &str,
    value: &str,
) -> Result<Vec<Vec<String>>, DbError> {
    let sql = table.select_statement(filter);
    let rows = sqlx::query(&sql)
        .bind(strip_quotes(value))
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| row_values(row, table))
        .collect::<Result<Vec<_>, _>>()
        .map_err(DbError::from)
}

fn row_values(row: &SqliteRow, table: TableSpec) -> Result<Vec<String>, sqlx::Error> {
    (0..table.columns.len())
        .map(|i| {
            row.try_get::<Option<String>, _>(i)
                .map(Option::unwrap_or_default)
        })
        .collect()
}
