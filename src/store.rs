use chrono::Utc;
use sqlx::{Pool, Sqlite};
use thiserror::Error;

use crate::models::quote::{title_case, NewQuote, PersonQuotes, Quote, QuoteOrder};

const QUOTE_COLUMNS: &str = "id, name, quote, submitter, timestamp, likes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quote not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store-access layer for quote records. The only place in the crate
/// that speaks SQL; handlers go through this and map `StoreError` to
/// responses.
#[derive(Clone)]
pub struct QuoteStore {
    pool: Pool<Sqlite>,
}

impl QuoteStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, order: QuoteOrder) -> Result<Vec<Quote>, StoreError> {
        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY {}", order.sql());

        let quotes = sqlx::query_as::<_, Quote>(&sql)
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, "an error occurred when listing quotes");
            })?;

        Ok(quotes)
    }

    /// Persists a new quote: the name is title-cased, the timestamp is
    /// the current server time, likes start at zero and the store
    /// assigns the id.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, new: NewQuote) -> Result<Quote, StoreError> {
        let name = title_case(&new.name);
        let timestamp = Utc::now();

        let result = sqlx::query(
            r#"
                INSERT INTO
                    quotes (name, quote, submitter, timestamp, likes)
                VALUES
                    ($1, $2, $3, $4, 0);
            "#,
        )
        .bind(&name)
        .bind(&new.quote)
        .bind(&new.submitter)
        .bind(timestamp)
        .execute(&self.pool)
        .await
        .inspect_err(|e| {
            tracing::error!(err = ?e, name = %name, "an error occurred when adding quote");
        })?;

        Ok(Quote {
            id: result.last_insert_rowid(),
            name,
            quote: new.quote,
            submitter: new.submitter,
            timestamp,
            likes: 0,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Quote, StoreError> {
        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = $1");

        sqlx::query_as::<_, Quote>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, id = %id, "an error occurred when fetching quote");
            })?
            .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, id = %id, "an error occurred when deleting quote");
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    /// Looks a person up in both roles: quotes attributed to them
    /// (newest first) and quotes they submitted. The input is
    /// title-cased before comparison, so the lookup is effectively
    /// case-insensitive. NotFound only when both lists come back empty.
    #[tracing::instrument(skip(self))]
    pub async fn by_person(&self, person: &str) -> Result<PersonQuotes, StoreError> {
        let person = title_case(person);

        let by_name_sql =
            format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE name = $1 ORDER BY timestamp DESC");
        let by_name = sqlx::query_as::<_, Quote>(&by_name_sql)
            .bind(&person)
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, person = %person, "an error occurred when fetching quotes by name");
            })?;

        let by_submitter_sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE submitter = $1");
        let by_submitter = sqlx::query_as::<_, Quote>(&by_submitter_sql)
            .bind(&person)
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, person = %person, "an error occurred when fetching quotes by submitter");
            })?;

        if by_name.is_empty() && by_submitter.is_empty() {
            return Err(StoreError::NotFound);
        }

        Ok(PersonQuotes {
            person,
            by_name,
            by_submitter,
        })
    }

    /// Increments the like counter inside a single transaction.
    /// Concurrent likes on the same id serialize on the store's write
    /// lock, so none of them is lost. NotFound when the record does
    /// not exist.
    #[tracing::instrument(skip(self))]
    pub async fn like(&self, id: i64) -> Result<Quote, StoreError> {
        let mut tx = self.pool.begin().await?;

        // The atomic increment is the first statement in the
        // transaction: the write lock is acquired before anything is
        // read, so concurrent likers queue on the busy timeout instead
        // of failing on a stale read snapshot.
        let result = sqlx::query("UPDATE quotes SET likes = likes + 1 WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, id = %id, "an error occurred when updating likes");
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = $1");
        let quote = sqlx::query_as::<_, Quote>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .inspect_err(|e| {
                tracing::error!(err = ?e, id = %id, "an error occurred when fetching quote");
            })?;

        tx.commit().await?;

        Ok(quote)
    }
}

#[cfg(test)]
pub(crate) async fn memory_store() -> QuoteStore {
    use std::str::FromStr;

    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    // A single connection keeps the in-memory database alive and shared
    // across every operation in the test.
    let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    QuoteStore::new(pool)
}

/// File-backed store with the production pool shape (several
/// connections, WAL, busy timeout), for tests that need real
/// cross-connection contention. The returned directory guard must
/// outlive the store.
#[cfg(test)]
pub(crate) async fn file_store() -> (QuoteStore, tempfile::TempDir) {
    use std::time::Duration;

    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

    let dir = tempfile::tempdir().unwrap();
    let opts = SqliteConnectOptions::new()
        .filename(dir.path().join("quotes.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(opts)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    (QuoteStore::new(pool), dir)
}
