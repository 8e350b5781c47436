//! Caller identity middleware for owner-scoped routes.
//!
//! Authentication happens upstream. The gateway forwards the resolved
//! identity as `x-user-id`, `x-user-role` and `x-owner-id` headers.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{HeaderMap, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use factoryflow_core::auth::{Permission, UserRole};
use factoryflow_shared::AppError;
use factoryflow_shared::types::{OwnerId, UserId};
use serde_json::json;

use crate::error::ApiError;

/// Header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the user's role in the owner's books.
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Header carrying the owner whose books the user belongs to.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// Identity of the caller, resolved from gateway headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// Authenticated user.
    pub user_id: UserId,
    /// Owner whose books the user may access.
    pub owner_id: OwnerId,
    /// Role within those books.
    pub role: UserRole,
}

impl Caller {
    fn from_headers(headers: &HeaderMap) -> Result<Self, &'static str> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        let user_id = header(USER_ID_HEADER)
            .and_then(|v| v.parse().ok())
            .ok_or("x-user-id header is missing or invalid")?;
        let owner_id = header(OWNER_ID_HEADER)
            .and_then(|v| v.parse().ok())
            .ok_or("x-owner-id header is missing or invalid")?;
        let role = header(USER_ROLE_HEADER)
            .and_then(|v| v.parse().ok())
            .ok_or("x-user-role header is missing or invalid")?;

        Ok(Self {
            user_id,
            owner_id,
            role,
        })
    }

    /// Checks that the caller may perform `permission` on `owner_id`'s books.
    ///
    /// # Errors
    ///
    /// Returns a forbidden error for another owner's books or a role that
    /// lacks the permission.
    pub fn authorize(&self, owner_id: OwnerId, permission: Permission) -> Result<(), ApiError> {
        if self.owner_id != owner_id {
            return Err(ApiError(AppError::Forbidden(
                "You do not have access to these books".to_string(),
            )));
        }
        self.role.authorize(permission)?;
        Ok(())
    }
}

/// Resolves the caller from headers and stores it in request extensions.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    match Caller::from_headers(request.headers()) {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(message) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "unauthorized",
                "message": message
            })),
        )
            .into_response(),
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().copied().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Caller identity required"
                })),
            )
        })
    }
}
