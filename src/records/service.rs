//! Record operations with validation and pagination bounds

use std::sync::Arc;
use tracing::debug;

use super::models::{Record, RecordDraft, RecordPage};
use super::repository::RecordRepository;
use super::validators::RecordValidator;
use crate::common::{ApiError, Validator};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

pub struct RecordService {
    repo: Arc<dyn RecordRepository>,
}

impl RecordService {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, draft: RecordDraft) -> Result<Record, ApiError> {
        let validation_result = RecordValidator.validate(&draft);
        if !validation_result.is_valid {
            return Err(ApiError::from(validation_result));
        }

        self.repo.create(&draft).await
    }

    pub async fn retrieve(&self, id: i64) -> Result<Record, ApiError> {
        self.repo
            .retrieve(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Record not found: {}", id)))
    }

    pub async fn update(&self, id: i64, draft: RecordDraft) -> Result<Record, ApiError> {
        let validation_result = RecordValidator.validate(&draft);
        if !validation_result.is_valid {
            return Err(ApiError::from(validation_result));
        }

        self.repo.update(id, &draft).await
    }

    pub async fn remove(&self, ids: Vec<i64>) -> Result<u64, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::ValidationError(
                "ids: at least one record id is required".to_string(),
            ));
        }

        self.repo.delete(&ids).await
    }

    /// Paginated listing. `limit` is clamped to 1..=100 (default 20),
    /// `offset` is floored at 0.
    pub async fn list(
        &self,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<RecordPage, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let total = self.repo.count().await?;
        let records = self.repo.list(offset, limit).await?;

        debug!(
            record_count = records.len(),
            total = total,
            offset = offset,
            limit = limit,
            "Loaded paginated records list"
        );

        Ok(RecordPage {
            records,
            total,
            offset,
            limit,
        })
    }

    /// Keyword search over title and body. A blank keyword returns an empty
    /// result without touching the table.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Record>, ApiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        self.repo.search(keyword).await
    }
}
