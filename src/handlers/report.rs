use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
};
use tracing::{debug, info, instrument, trace};

use compute::report;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::schemas::AppState;

/// Generate and download the per-category sales summary.
///
/// The summary is computed fresh from a full catalog scan on every
/// request; nothing is cached between calls.
#[utoipa::path(
    get,
    path = "/generate_report",
    tag = "report",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "CSV report attachment", content_type = "text/csv"),
        (status = 401, description = "Missing, invalid or expired bearer token", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, claims), fields(username = %claims.username()))]
pub async fn generate_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<(HeaderMap, Vec<u8>), ApiError> {
    trace!("Entering generate_report function");
    debug!("Generating sales summary for user: {}", claims.username());

    let rows = report::summarize(&state.db).await?;
    let bytes = report::write_csv(&rows)?;
    info!(categories = rows.len(), "Sales summary generated");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"summary_report.csv\""),
    );

    Ok((headers, bytes))
}
