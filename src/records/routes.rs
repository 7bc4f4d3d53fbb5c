use super::handlers;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Creates the records router
///
/// # Routes
/// - `POST /record` - Create a record (admin)
/// - `DELETE /record/remove?ids=` - Bulk delete (admin)
/// - `PUT /record/:id` - Replace a record (admin)
/// - `GET /record/list?offset=&limit=` - Paginated listing
/// - `GET /record/search?keyword=` - Keyword search
pub fn records_routes() -> Router {
    Router::new()
        .route("/record", post(handlers::create_record))
        .route("/record/remove", delete(handlers::remove_records))
        .route("/record/:id", put(handlers::update_record))
        .route("/record/list", get(handlers::list_records))
        .route("/record/search", get(handlers::search_records))
}
