use std::collections::BTreeMap;

use reqwest::StatusCode;
use rolegate_core::AppError;
use serde::Deserialize;

/// Response body shape shared by every directory endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ApiEnvelope<T> {
    pub(super) data: Option<T>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) errors: BTreeMap<String, Vec<String>>,
}

/// Maps a failed response to the matching application error.
pub(super) fn error_for_status(
    status: StatusCode,
    message: Option<String>,
    errors: &BTreeMap<String, Vec<String>>,
) -> AppError {
    let mut message = message.unwrap_or_else(|| format!("HTTP {status}"));
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(|(field, problems)| format!("{field}: {}", problems.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        message = format!("{message} ({details})");
    }

    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Validation(message)
        }
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::Internal(format!("directory request failed: {message}")),
    }
}
