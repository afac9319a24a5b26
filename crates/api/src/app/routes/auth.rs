use std::sync::Arc;

use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use crate::app::errors::ApiError;
use crate::app::{AppServices, dto};
use crate::context::SessionContext;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> Result<axum::response::Response, ApiError> {
    if let Err(e) = services.credentials.verify(&body.username, &body.password) {
        tracing::warn!(username = %body.username, "login rejected");
        return Err(e.into());
    }

    let (token, claims) = services
        .sessions
        .issue(&body.username, Utc::now(), services.session_ttl)?;
    tracing::info!(username = %claims.sub, "logged in");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token.to_string(),
            "expires_at": claims.expires_at,
        })),
    )
        .into_response())
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> StatusCode {
    services.sessions.revoke(&session.token());
    tracing::info!(username = session.username(), "logged out");
    StatusCode::NO_CONTENT
}
