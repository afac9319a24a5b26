use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;

use sexyboom_sales::{ReportFilter, build_report};

use crate::app::errors::ApiError;
use crate::app::{AppServices, dto};

pub fn router() -> Router {
    Router::new().route("/", get(sales_report))
}

/// Paid sales between `start_date` and `end_date`, both inclusive, optionally
/// narrowed by `client` and `id`.
pub async fn sales_report(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ReportQuery>,
) -> Result<axum::response::Response, ApiError> {
    let start = parse_date("start_date", query.start_date.as_deref())?;
    let end = parse_date("end_date", query.end_date.as_deref())?;

    let filter = ReportFilter {
        client: query.client,
        id: query.id,
    };

    let notes = services.store.list_sales_notes()?;
    let report = build_report(&notes, start, end, &filter)?;
    Ok(Json(report).into_response())
}

fn parse_date(field: &str, raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{field} is required")))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("{field} must be a date like 2024-01-31 (got {raw:?})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("start_date", Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn rejects_missing_or_malformed_dates() {
        assert!(matches!(parse_date("end_date", None), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_date("end_date", Some(" ")), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_date("end_date", Some("31/01/2024")), Err(ApiError::BadRequest(_))));
    }
}
