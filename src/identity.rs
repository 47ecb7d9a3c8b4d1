//! Extract caller identity (tenant and user) from request headers.
//!
//! Bearer-token verification happens upstream; by the time a request
//! reaches this layer the gateway has already resolved the caller and
//! forwarded tenant and user ids as headers.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Header carrying the tenant id. Required on every entity route.
pub const TENANT_ID_HEADER: &str = "X-Tenant-ID";

/// Header carrying the acting user id. Optional.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// Identity stamped onto records and threaded through service calls.
#[derive(Clone, Copy, Debug)]
pub struct RequestIdentity {
    pub tenant_id: Uuid,
    pub user_id: Option<Uuid>,
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Option<Uuid>, AppError> {
    let raw = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    match raw {
        None => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be a valid UUID", name))),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tenant_id = header_uuid(parts, TENANT_ID_HEADER)?
            .ok_or_else(|| AppError::BadRequest(format!("{} header is required", TENANT_ID_HEADER)))?;
        let user_id = header_uuid(parts, USER_ID_HEADER)?;
        Ok(RequestIdentity { tenant_id, user_id })
    }
}
