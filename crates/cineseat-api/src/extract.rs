//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use cineseat_core::error::AppError;
use cineseat_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated caller's id, set by the upstream
/// gateway. Requests reaching this service without it are malformed.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracts the caller identity from the `x-user-id` header.
#[derive(Debug, Clone, Copy)]
pub struct CallerId(pub RequestContext);

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::validation(format!("missing {USER_ID_HEADER} header")))?;
        let raw = value
            .to_str()
            .map_err(|_| AppError::validation(format!("malformed {USER_ID_HEADER} header")))?;
        let user_id: Uuid = raw
            .parse()
            .map_err(|_| AppError::validation(format!("{USER_ID_HEADER} must be a UUID")))?;
        Ok(CallerId(RequestContext::new(user_id)))
    }
}
