use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Payload for create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDraft {
    pub title: String,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveParams {
    /// Comma-separated record ids, e.g. `ids=3,17,42`
    pub ids: Option<String>,
}

/// Envelope for the paginated list endpoint.
#[derive(Debug, Serialize)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: u64,
}
