use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use wildseries_core::error::ApiError;
use wildseries_core::slug::is_valid_slug;

use crate::error::AppError;

/// A single slug-like path segment (`breaking-bad`).
///
/// Segments that are not lowercase alphanumeric runs joined by single
/// hyphens are answered with 404 before the handler runs, as if no route
/// matched.
#[derive(Debug, Clone)]
pub struct SlugParam(pub String);

impl<S> FromRequestParts<S> for SlugParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let no_route = || ApiError::NotFound(format!("No route found for \"{path}\""));

        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| no_route())?;

        if !is_valid_slug(&segment) {
            return Err(no_route().into());
        }
        Ok(SlugParam(segment))
    }
}
