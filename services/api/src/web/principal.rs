//! services/api/src/web/principal.rs
//!
//! Middleware that turns the identity headers set by the upstream auth
//! layer into a request-scoped `Principal`. Session issuance itself is an
//! external collaborator; this service only trusts what the gateway
//! forwards.

use axum::{extract::Request, middleware::Next, response::Response};
use courseware_core::domain::{Principal, Role};
use courseware_core::ports::PortError;
use uuid::Uuid;

use crate::error::ApiError;

const USER_ID_HEADER: &str = "x-user-id";
const ROLE_HEADER: &str = "x-user-role";

/// Extracts the principal from `x-user-id` / `x-user-role` and inserts it
/// into request extensions for handlers to use. Requests without a usable
/// principal are rejected with 401.
pub async fn require_principal(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or(ApiError::Port(PortError::Unauthorized))?;

    let role = match req
        .headers()
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("owner") => Role::Owner,
        Some("learner") => Role::Learner,
        _ => return Err(ApiError::Port(PortError::Unauthorized)),
    };

    req.extensions_mut().insert(Principal { user_id, role });
    Ok(next.run(req).await)
}
