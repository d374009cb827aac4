use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Middleware rejecting requests that do not carry the configured admin key.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    if let Err(e) = check_admin_key(provided, &state.config.admin_api_key) {
        warn!("Rejected admin request to {}", request.uri().path());
        return Err(e);
    }
    Ok(next.run(request).await)
}

/// Missing key → 401, wrong key → 403.
pub fn check_admin_key(provided: Option<&str>, expected: &str) -> Result<(), AppError> {
    match provided {
        None => Err(AppError::Unauthorized),
        Some(key) if key.is_empty() => Err(AppError::Unauthorized),
        Some(key) if key == expected => Ok(()),
        Some(_) => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_unauthorized() {
        assert!(matches!(check_admin_key(None, "s3cret"), Err(AppError::Unauthorized)));
        assert!(matches!(check_admin_key(Some(""), "s3cret"), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_wrong_key_is_forbidden() {
        assert!(matches!(
            check_admin_key(Some("guess"), "s3cret"),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_matching_key_passes() {
        assert!(check_admin_key(Some("s3cret"), "s3cret").is_ok());
    }
}
