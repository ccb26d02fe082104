//! Request extractors that reject with [`ApiError`] instead of axum's plain-text bodies

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use rentbook_core::{DomainError, User};
use rentbook_shared::{EntityId, UNASSIGNED_ID};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// JSON body that has passed `validator` checks.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(DomainError::from)?;
        Ok(ValidatedJson(value))
    }
}

/// `{id}` path segment. A segment that is not a valid id becomes
/// [`UNASSIGNED_ID`], so it resolves to the same 404 as any missing record.
pub struct PathId(pub EntityId);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(PathId(parse_id(&raw)))
    }
}

fn parse_id(raw: &str) -> EntityId {
    raw.parse().unwrap_or(UNASSIGNED_ID)
}

/// The user resolved by the session middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::from(DomainError::Unauthorized))
    }
}
