use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use rolegate_core::{AppError, SessionIdentity};
use tower_sessions::Session;
use url::Url;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the signed-in user for protected routes.
///
/// The session only carries the identity; the user with its roles and grants
/// is re-read from the directory on every request so that grant changes apply
/// immediately. A session whose user was deleted is treated as signed out.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<SessionIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let actor = state.directory_service.resolve_actor(&identity).await?;

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Forbidden("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok());
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok());

        if !is_allowed_origin(&state.frontend_url, origin, referer) {
            return Err(AppError::Forbidden("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Requests without browser origin headers (CLI and service clients) pass;
/// browser requests must come from the configured frontend. `Origin` decides
/// alone when present; `Referer` is only consulted without it.
fn is_allowed_origin(frontend_url: &str, origin: Option<&str>, referer: Option<&str>) -> bool {
    let claimed = match (origin, referer) {
        (None, None) => return true,
        (Some(origin), _) => origin,
        (None, Some(referer)) => referer,
    };

    match (web_origin(frontend_url), web_origin(claimed)) {
        (Some(expected), Some(claimed)) => claimed == expected,
        _ => false,
    }
}

fn web_origin(value: &str) -> Option<url::Origin> {
    let origin = Url::parse(value).ok()?.origin();
    origin.is_tuple().then_some(origin)
}
