use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod products;
pub mod reports;
pub mod sales_notes;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/auth/logout", post(auth::logout))
        .nest("/products", products::router())
        .nest("/clients", clients::router())
        .nest("/sales-notes", sales_notes::router())
        .nest("/dashboard", dashboard::router())
        .nest("/reports", reports::router())
}
