//! Authentication
//!
//! Mutating handlers take an [`AuthenticatedUser`], which verifies the bearer
//! token on extraction. Read handlers do not, so they stay public.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::AuthService,
    state::AppState,
};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Fail with 403 unless the user holds one of `allowed_roles`
    pub fn require_role(&self, allowed_roles: &[&str]) -> AppResult<()> {
        if allowed_roles.contains(&self.role.as_str()) {
            Ok(())
        } else {
            debug!(user_id = %self.id, role = %self.role, "Insufficient permissions");
            Err(AppError::Forbidden("Insufficient permissions".to_string()))
        }
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();

        let Some(auth_header) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        else {
            debug!(path = %path, "Auth failed: No Authorization header");
            return Err(AppError::Unauthorized);
        };

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            debug!(path = %path, "Auth failed: Invalid Authorization format (expected 'Bearer <token>')");
            return Err(AppError::Unauthorized);
        };

        let claims = AuthService::verify_token(token, &state.config().jwt.secret).inspect_err(|e| {
            debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
        })?;

        let id = Uuid::parse_str(&claims.sub).map_err(|e| {
            debug!(path = %path, sub = %claims.sub, error = ?e, "Auth failed: Invalid user ID in token");
            AppError::InvalidToken
        })?;

        debug!(path = %path, user_id = %id, username = %claims.username, role = %claims.role, "User authenticated");

        Ok(Self {
            id,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::roles;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "kari".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_event_writers() {
        assert!(user(roles::ADMIN).require_role(roles::EVENT_WRITERS).is_ok());
        assert!(user(roles::EVENT_ADMIN).require_role(roles::EVENT_WRITERS).is_ok());

        let err = user("user").require_role(roles::EVENT_WRITERS).unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }
}
