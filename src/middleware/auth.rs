//! Request identity extraction
//!
//! Authentication itself happens at the gateway in front of this service.
//! The gateway forwards the verified caller identity in trusted headers,
//! and the extractor below turns those headers into a typed user.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;
use uuid::Uuid;

use crate::{
    constants::{roles, USER_ID_HEADER, USER_ROLE_HEADER},
    error::AppError,
};

/// Caller identity forwarded by the gateway
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let id = Uuid::parse_str(raw_id).map_err(|_| {
            debug!(header = raw_id, "Rejected request with malformed user ID header");
            AppError::Unauthorized
        })?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(roles::PARTICIPANT)
            .to_string();

        Ok(CurrentUser { id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_for(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_extracts_user_from_headers() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .uri("/api/v1/submissions")
            .header(USER_ID_HEADER, id.to_string())
            .header(USER_ROLE_HEADER, roles::ADMIN)
            .body(())
            .unwrap();
        let mut parts = parts_for(request);

        let user = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(user.id, id);
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_role_defaults_to_participant() {
        let request = Request::builder()
            .uri("/api/v1/submissions")
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .unwrap();
        let mut parts = parts_for(request);

        let user = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(user.role, roles::PARTICIPANT);
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().uri("/api/v1/submissions").body(()).unwrap();
        let mut parts = parts_for(request);

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_malformed_id_is_unauthorized() {
        let request = Request::builder()
            .uri("/api/v1/submissions")
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        let mut parts = parts_for(request);

        let result = CurrentUser::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
