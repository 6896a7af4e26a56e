//! Session extraction and role checks.
//!
//! An upstream gateway authenticates the caller and forwards the user id and
//! role as `X-User-Id` and `X-User-Role` headers. [`Session`] is built from
//! them once per request; [`require_hr_or_admin`] guards the admin routes.

use std::fmt;
use std::str::FromStr;

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;

use super::response::ApiErrorResponse;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Role of the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular employee; sees their own records.
    Employee,
    /// Human resources staff.
    Hr,
    /// Administrator.
    Admin,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Hr => "HR",
            Role::Admin => "ADMIN",
        }
    }

    /// HR and admin users may see every employee.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Hr | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Ok(Role::Employee),
            "HR" => Ok(Role::Hr),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The user id.
    pub user_id: String,
    /// The user role.
    pub role: Role,
}

impl Session {
    fn from_parts(parts: &Parts) -> Result<Self, EngineError> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let user_id = header(USER_ID_HEADER).ok_or_else(|| EngineError::Unauthorized {
            message: "missing X-User-Id header".to_string(),
        })?;
        let role = header(USER_ROLE_HEADER)
            .ok_or_else(|| EngineError::Unauthorized {
                message: "missing X-User-Role header".to_string(),
            })?
            .parse::<Role>()
            .map_err(|message| EngineError::Unauthorized { message })?;

        Ok(Self {
            user_id: user_id.to_string(),
            role,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Session::from_parts(parts).map_err(|err| {
            warn!(path = %parts.uri.path(), error = %err, "Rejected session");
            err.into()
        })
    }
}

/// Admits HR and admin sessions only.
pub async fn require_hr_or_admin(
    session: Session,
    OriginalUri(uri): OriginalUri,
    request: Request,
    next: Next,
) -> Result<Response, ApiErrorResponse> {
    if !session.role.is_staff() {
        warn!(
            user_id = %session.user_id,
            role = %session.role,
            path = %uri.path(),
            "Role not allowed"
        );
        return Err(EngineError::Forbidden {
            role: session.role.to_string(),
            resource: uri.path().to_string(),
        }
        .into());
    }
    Ok(next.run(request).await)
}
