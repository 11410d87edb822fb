//! PostgreSQL record store
//!
//! Every statement is parameterized and runs under a fixed deadline. The
//! table name comes from configuration and `group` is a reserved word, so
//! both are quoted here and nowhere else.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RecordStore, StoreError};
use crate::record::Record;

/// Default table holding student records.
pub const DEFAULT_TABLE: &str = "sisdata";

/// Default per-operation deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(3);

/// Store configuration, fixed at startup
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Unquoted table name
    pub table: String,

    /// Budget for a single store operation, including pool checkout
    pub deadline: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Statement text, rendered once per store
#[derive(Debug)]
struct Statements {
    create_table: String,
    list: String,
    insert: String,
    get: String,
    update: String,
    delete: String,
}

impl Statements {
    fn render(table: &str) -> Self {
        let table = quote_ident(table);
        let group = quote_ident("group");
        let columns = format!("id, name, lname, nostudent, {group}, branch");

        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id BIGINT PRIMARY KEY,
                    name TEXT NOT NULL DEFAULT '',
                    lname TEXT NOT NULL DEFAULT '',
                    nostudent TEXT NOT NULL DEFAULT '',
                    {group} TEXT NOT NULL DEFAULT '',
                    branch TEXT NOT NULL DEFAULT ''
                )"
            ),
            list: format!("SELECT {columns} FROM {table}"),
            insert: format!(
                "INSERT INTO {table} ({columns}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id"
            ),
            get: format!("SELECT {columns} FROM {table} WHERE id = $1"),
            update: format!(
                "UPDATE {table} SET name = $1, lname = $2, nostudent = $3, {group} = $4, branch = $5 WHERE id = $6"
            ),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

/// Quote a PostgreSQL identifier, doubling embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Run `fut` under `deadline`, mapping expiry to [`StoreError::Timeout`].
///
/// Dropping the timed-out future releases any pooled connection it held.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .unwrap_or(Err(StoreError::Timeout { after: deadline }))
}

/// Record store backed by a PostgreSQL pool
pub struct PgRecordStore {
    pool: PgPool,
    deadline: Duration,
    sql: Statements,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, config: &StoreConfig) -> Self {
        Self {
            pool,
            deadline: config.deadline,
            sql: Statements::render(&config.table),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the record table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        tracing::info!("Ensuring record table exists");

        with_deadline(self.deadline, async {
            sqlx::query(&self.sql.create_table)
                .execute(&self.pool)
                .await?;
            Ok::<_, StoreError>(())
        })
        .await
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        with_deadline(self.deadline, async {
            let records = sqlx::query_as::<_, Record>(&self.sql.list)
                .fetch_all(&self.pool)
                .await?;
            Ok::<_, StoreError>(records)
        })
        .await
    }

    async fn create(&self, record: &Record) -> Result<i64, StoreError> {
        with_deadline(self.deadline, async {
            let result = sqlx::query_scalar::<_, i64>(&self.sql.insert)
                .bind(record.id)
                .bind(&record.first_name)
                .bind(&record.last_name)
                .bind(&record.student_number)
                .bind(&record.group)
                .bind(&record.branch)
                .fetch_one(&self.pool)
                .await;

            match result {
                Ok(id) => Ok(id),
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                    Err(StoreError::Conflict { id: record.id })
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Record>, StoreError> {
        with_deadline(self.deadline, async {
            let record = sqlx::query_as::<_, Record>(&self.sql.get)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok::<_, StoreError>(record)
        })
        .await
    }

    async fn update(&self, record: &Record) -> Result<(), StoreError> {
        with_deadline(self.deadline, async {
            let result = sqlx::query(&self.sql.update)
                .bind(&record.first_name)
                .bind(&record.last_name)
                .bind(&record.student_number)
                .bind(&record.group)
                .bind(&record.branch)
                .bind(record.id)
                .execute(&self.pool)
                .await?;

            tracing::debug!(id = record.id, rows = result.rows_affected(), "record updated");
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        with_deadline(self.deadline, async {
            let result = sqlx::query(&self.sql.delete)
                .bind(id)
                .execute(&self.pool)
                .await?;

            tracing::debug!(id, rows = result.rows_affected(), "record deleted");
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        with_deadline(self.deadline, async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok::<_, StoreError>(())
        })
        .await
    }
}
