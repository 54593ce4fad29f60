//! Bearer-token session extractor for protected routes

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use shared::SessionUser;

use crate::error::ApiError;
use crate::AppState;

/// Signed-in caller, resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let user = state
            .store
            .user_for_token(token)
            .await
            .ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser {
            user,
            token: token.to_string(),
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::http::Request;
    use shared::SignInRequest;

    use crate::storage::Store;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/user/whoami");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts.headers), Some("abc123"));
        let parts = parts_with_auth(Some("Basic abc123"));
        assert_eq!(bearer_token(&parts.headers), None);
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts.headers), None);
    }

    #[tokio::test]
    async fn test_extractor_resolves_session() {
        let state = AppState {
            store: Arc::new(Store::in_memory()),
        };
        let session = state
            .store
            .sign_in(&SignInRequest {
                name: "ada".into(),
                image: None,
            })
            .await
            .unwrap();

        let mut parts = parts_with_auth(Some(&format!("Bearer {}", session.token)));
        let auth = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(auth.user.name, "ada");

        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
