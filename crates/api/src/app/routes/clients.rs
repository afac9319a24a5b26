use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use sexyboom_clients::{ClientDraft, ClientPatch};
use sexyboom_core::{ClientId, DomainError};
use sexyboom_inventory::find_client_by_national_id;

use crate::app::errors::ApiError;
use crate::app::{AppServices, dto};

type ApiResult = Result<axum::response::Response, ApiError>;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/by-national-id/:national_id", get(get_client_by_national_id))
        .route("/:id", get(get_client).put(update_client).delete(delete_client))
}

pub async fn list_clients(Extension(services): Extension<Arc<AppServices>>) -> ApiResult {
    let items = services
        .store
        .list_clients()?
        .iter()
        .map(dto::client_to_json)
        .collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "items": items })).into_response())
}

pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<ClientDraft>,
) -> ApiResult {
    let client = services.store.create_client(body)?;
    Ok((StatusCode::CREATED, Json(dto::client_to_json(&client))).into_response())
}

pub async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: ClientId = id.parse()?;
    let client = services.store.get_client(id)?;
    Ok(Json(dto::client_to_json(&client)).into_response())
}

pub async fn get_client_by_national_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(national_id): Path<String>,
) -> ApiResult {
    let clients = services.store.list_clients()?;
    let client = find_client_by_national_id(&clients, &national_id)
        .ok_or_else(|| DomainError::not_found(format!("client with national id {national_id}")))?;
    Ok(Json(dto::client_to_json(client)).into_response())
}

pub async fn update_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ClientPatch>,
) -> ApiResult {
    let id: ClientId = id.parse()?;
    let client = services.store.update_client(id, body)?;
    Ok(Json(dto::client_to_json(&client)).into_response())
}

pub async fn delete_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id: ClientId = id.parse()?;
    services.store.delete_client(id)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
