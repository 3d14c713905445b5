//! 인증된 요청 주체
//!
//! 인증 미들웨어가 액세스 토큰 검증에 성공하면 request extensions 에 저장하고,
//! 핸들러는 extractor 로 꺼내 사용합니다.
//!
//! ```rust,ignore
//! #[get("")]
//! pub async fn get_current_user(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     log::info!("요청 사용자: {}", user.user_id);
//!     // ...
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use crate::domain::models::token::Claims;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// 액세스 토큰의 `sub`
    pub user_id: Uuid,
    /// 액세스 토큰의 `jti`
    pub token_id: Uuid,
}

impl From<&Claims> for AuthenticatedUser {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            token_id: claims.jti,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증 정보가 없는 요청입니다".to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_user_from_extensions() {
        let expected = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            token_id: Uuid::new_v4(),
        };
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(expected.clone());

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user, expected);
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
