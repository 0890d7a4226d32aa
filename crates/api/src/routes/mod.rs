pub mod channels;
pub mod health;
pub mod metrics;
pub mod webhooks;

use axum::http::HeaderMap;
use common::{AppId, PlatformApiUrl};
use store::RecordScope;

use crate::error::ApiError;

/// Header carrying the API URL of the platform instance that sent the request.
pub const PLATFORM_API_URL_HEADER: &str = "platform-api-url";

/// Builds the record scope for a request from its platform header and the
/// installation's app id.
pub(crate) fn request_scope(headers: &HeaderMap, app_id: &AppId) -> Result<RecordScope, ApiError> {
    let url = headers
        .get(PLATFORM_API_URL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingHeader(PLATFORM_API_URL_HEADER))?;

    Ok(RecordScope::new(PlatformApiUrl::new(url), app_id.clone()))
}
