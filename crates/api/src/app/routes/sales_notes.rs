use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use sexyboom_core::SalesNoteId;
use sexyboom_infra::NewSalesNote;
use sexyboom_sales::{SalesNoteQuery, paginate};

use crate::app::AppServices;
use crate::app::errors::ApiError;

type ApiResult = Result<axum::response::Response, ApiError>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales_notes).post(open_sales_note))
        .route("/:id", get(get_sales_note).delete(delete_sales_note))
        .route("/:id/confirm", post(confirm_sales_note))
}

/// `?page=&search=`; 10 notes per page.
pub async fn list_sales_notes(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<SalesNoteQuery>,
) -> ApiResult {
    let notes = services.store.list_sales_notes()?;
    Ok(Json(paginate(&notes, &query)).into_response())
}

pub async fn open_sales_note(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewSalesNote>,
) -> ApiResult {
    let note = services.store.open_sales_note(body, services.today())?;
    Ok((StatusCode::CREATED, Json(note)).into_response())
}

pub async fn get_sales_note(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: SalesNoteId = id.parse()?;
    let note = services.store.get_sales_note(id)?;
    Ok(Json(note).into_response())
}

/// Mark the note paid and move its quantities out of stock.
pub async fn confirm_sales_note(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: SalesNoteId = id.parse()?;
    let note = services.store.confirm_sales_note(id, services.today())?;
    Ok(Json(note).into_response())
}

pub async fn delete_sales_note(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: SalesNoteId = id.parse()?;
    services.store.delete_sales_note(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
