use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::models::{
    ListParams, Record, RecordDraft, RecordPage, RemoveParams, RemovedResponse, SearchParams,
};
use super::repository::SqliteRecordRepository;
use super::service::RecordService;
use super::validators::parse_id_list;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

fn record_service(state: &AppState) -> RecordService {
    RecordService::new(Arc::new(SqliteRecordRepository::new(state.db.clone())))
}

/// POST /record - Create a record
pub async fn create_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(draft): Json<RecordDraft>,
) -> Result<impl IntoResponse, ApiError> {
    if !user.is_admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let app_state = state.read().await;
    let record = record_service(&app_state).create(draft).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /record/remove?ids=1,2,3 - Bulk delete records
pub async fn remove_records(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Query(params): Query<RemoveParams>,
) -> Result<Json<RemovedResponse>, ApiError> {
    if !user.is_admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let ids = parse_id_list(params.ids.as_deref().unwrap_or(""))?;

    let app_state = state.read().await;
    let removed = record_service(&app_state).remove(ids).await?;

    info!(removed = removed, "Bulk record removal completed");

    Ok(Json(RemovedResponse { removed }))
}

/// PUT /record/:id - Replace a record's content
pub async fn update_record(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<i64>,
    Json(draft): Json<RecordDraft>,
) -> Result<Json<Record>, ApiError> {
    if !user.is_admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let app_state = state.read().await;
    let record = record_service(&app_state).update(id, draft).await?;

    Ok(Json(record))
}

/// GET /record/list?offset=&limit= - Paginated record listing
pub async fn list_records(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Query(params): Query<ListParams>,
) -> Result<Json<RecordPage>, ApiError> {
    let app_state = state.read().await;
    let page = record_service(&app_state)
        .list(params.offset, params.limit)
        .await?;

    Ok(Json(page))
}

/// GET /record/search?keyword= - Keyword search over records
pub async fn search_records(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    _user: AuthedUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let app_state = state.read().await;
    let records = record_service(&app_state)
        .search(params.keyword.as_deref().unwrap_or(""))
        .await?;

    Ok(Json(records))
}
