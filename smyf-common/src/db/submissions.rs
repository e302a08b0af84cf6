//! Insert and read operations for `submissions` and `tag_submissions`
//!
//! The two tables share no key. Inserts are independent statements with no
//! enclosing transaction, so a failed tag insert leaves its submission row
//! in place.

use crate::db::models::{NewSubmission, Submission, Table, TagSubmission};
use crate::Result;
use serde_json::{json, Value};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, ValueRef};
use tracing::debug;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Insert one registrant row, returning its new id
///
/// Fields are bound exactly as received; constraint violations (e.g. a
/// missing field binding NULL) surface as `Error::Database`.
pub async fn insert_submission(pool: &SqlitePool, submission: &NewSubmission) -> Result<i64> {
    let query = sqlx::query(
        r#"
        INSERT INTO submissions (chname, cpname, name, pnumber, nvcount, vcount)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    );
    let query = bind_value(query, &submission.chname);
    let query = bind_value(query, &submission.cpname);
    let query = bind_value(query, &submission.name);
    let query = bind_value(query, &submission.pnumber);
    let query = bind_value(query, &submission.nvcount);
    let query = bind_value(query, &submission.vcount);

    let id = query.execute(pool).await?.last_insert_rowid();
    debug!("Inserted submission {}", id);
    Ok(id)
}

/// Insert one serialized tag list, returning its new id
pub async fn insert_tag_submission(pool: &SqlitePool, serialized_tags: &str) -> Result<i64> {
    let id = sqlx::query("INSERT INTO tag_submissions (tags) VALUES (?)")
        .bind(serialized_tags)
        .execute(pool)
        .await?
        .last_insert_rowid();
    debug!("Inserted tag submission {}", id);
    Ok(id)
}

/// Read every submission row in identity order
pub async fn list_submissions(pool: &SqlitePool) -> Result<Vec<Submission>> {
    let rows = sqlx::query(
        "SELECT id, chname, cpname, name, pnumber, nvcount, vcount FROM submissions ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(submission_from_row).collect()
}

/// Read every tag row in identity order
pub async fn list_tag_submissions(pool: &SqlitePool) -> Result<Vec<TagSubmission>> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, tags FROM tag_submissions ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, tags)| TagSubmission { id, tags })
        .collect())
}

/// Count rows in one of the store's tables
pub async fn count_rows(pool: &SqlitePool, table: Table) -> Result<i64> {
    // Table names come from the enum, never from input
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table.name()))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Serialize a tag list to compact JSON array text, e.g. `["veg","family"]`
pub fn serialize_tags(tags: &[Value]) -> String {
    Value::Array(tags.to_vec()).to_string()
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &'q Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else {
                query.bind(n.as_f64())
            }
        }
        Value::String(s) => query.bind(s.as_str()),
        Value::Array(_) | Value::Object(_) => query.bind(value.to_string()),
    }
}

fn submission_from_row(row: &SqliteRow) -> Result<Submission> {
    Ok(Submission {
        id: row.try_get("id")?,
        chname: row.try_get("chname")?,
        cpname: row.try_get("cpname")?,
        name: row.try_get("name")?,
        pnumber: row.try_get("pnumber")?,
        nvcount: column_value(row, "nvcount"),
        vcount: column_value(row, "vcount"),
    })
}

/// Convert a dynamically typed SQLite column to JSON
fn column_value(row: &SqliteRow, column: &str) -> Value {
    row.try_get_raw(column)
        .ok()
        .and_then(|val| {
            if val.is_null() {
                Some(Value::Null)
            } else {
                row.try_get::<i64, _>(column)
                    .ok()
                    .map(|v| json!(v))
                    .or_else(|| row.try_get::<f64, _>(column).ok().map(|v| json!(v)))
                    .or_else(|| row.try_get::<String, _>(column).ok().map(Value::String))
            }
        })
        .unwrap_or(Value::Null)
}
