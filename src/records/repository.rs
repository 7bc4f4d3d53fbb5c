//! Record persistence

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use super::models::{Record, RecordDraft};
use crate::common::ApiError;

/// Search results are capped; the endpoint is a keyword lookup, not a dump.
const SEARCH_RESULT_CAP: i64 = 100;

/// Persistence contract for records.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn create(&self, draft: &RecordDraft) -> Result<Record, ApiError>;

    async fn retrieve(&self, id: i64) -> Result<Option<Record>, ApiError>;

    /// Full replace of the mutable fields. `NotFound` when the id is absent.
    async fn update(&self, id: i64, draft: &RecordDraft) -> Result<Record, ApiError>;

    /// Bulk delete; returns the number of rows removed.
    async fn delete(&self, ids: &[i64]) -> Result<u64, ApiError>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Record>, ApiError>;

    async fn count(&self) -> Result<i64, ApiError>;

    /// Keyword match over title and body. The keyword is already trimmed;
    /// escaping of LIKE metacharacters happens here.
    async fn search(&self, keyword: &str) -> Result<Vec<Record>, ApiError>;
}

pub struct SqliteRecordRepository {
    db: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Escape `%`, `_`, and the escape character itself for a LIKE pattern.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn create(&self, draft: &RecordDraft) -> Result<Record, ApiError> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO records (title, body, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&draft.title)
        .bind(draft.body.as_deref())
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        let id = result.last_insert_rowid();
        info!(record_id = id, "Created record");

        self.retrieve(id)
            .await?
            .ok_or_else(|| ApiError::InternalServer("created record not readable".to_string()))
    }

    async fn retrieve(&self, id: i64) -> Result<Option<Record>, ApiError> {
        sqlx::query_as::<_, Record>(
            "SELECT id, title, body, created_at, updated_at FROM records WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    async fn update(&self, id: i64, draft: &RecordDraft) -> Result<Record, ApiError> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE records SET title = ?, body = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&draft.title)
        .bind(draft.body.as_deref())
        .bind(&now)
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("Record not found: {}", id)));
        }

        self.retrieve(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Record not found: {}", id)))
    }

    async fn delete(&self, ids: &[i64]) -> Result<u64, ApiError> {
        if ids.is_empty() {
            return Ok(0);
        }

        // Dynamic placeholder list for the IN clause
        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("DELETE FROM records WHERE id IN ({})", placeholders);

        let mut query_builder = sqlx::query(&query);
        for id in ids {
            query_builder = query_builder.bind(*id);
        }

        let result = query_builder
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(removed = result.rows_affected(), "Removed records");

        Ok(result.rows_affected())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Record>, ApiError> {
        sqlx::query_as::<_, Record>(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM records
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    async fn count(&self) -> Result<i64, ApiError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM records")
            .fetch_one(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Record>, ApiError> {
        let pattern = format!("%{}%", escape_like(keyword));

        sqlx::query_as::<_, Record>(
            r#"
            SELECT id, title, body, created_at, updated_at
            FROM records
            WHERE title LIKE ? ESCAPE '\' OR body LIKE ? ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(SEARCH_RESULT_CAP)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
