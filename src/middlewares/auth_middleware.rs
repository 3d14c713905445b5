//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 인증된 사용자를 요청에 바인딩합니다.
//! 보호된 스코프에만 `wrap` 하며, 통과하지 못한 요청은 핸들러에 도달하지 않습니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::SessionService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    sessions: Arc<SessionService>,
}

impl AuthMiddleware {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::session_service::tests::service_with_clock;
    use crate::services::auth::token_service::tests::ManualClock;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use std::time::Duration;
    use uuid::Uuid;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id.to_string())
    }

    async fn call_with_header(
        sessions: Arc<SessionService>,
        header: Option<String>,
    ) -> (StatusCode, web::Bytes) {
        let app = test::init_service(
            App::new().service(
                web::scope("/protected")
                    .wrap(AuthMiddleware::new(sessions))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/protected");
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        (resp.status(), test::read_body(resp).await)
    }

    fn sessions() -> (Arc<SessionService>, Arc<ManualClock>) {
        let clock = ManualClock::starting_at(1_700_000_000);
        (Arc::new(service_with_clock(clock.clone())), clock)
    }

    #[actix_web::test]
    async fn test_valid_bearer_token_binds_subject() {
        let (sessions, _) = sessions();
        let user_id = Uuid::new_v4();
        let pair = sessions.new_pair(user_id).unwrap();

        let (status, body) =
            call_with_header(sessions, Some(format!("Bearer {}", pair.access_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let (sessions, _) = sessions();
        let (status, _) = call_with_header(sessions, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_malformed_headers_are_unauthorized() {
        let (sessions, _) = sessions();
        let token = sessions.new_pair(Uuid::new_v4()).unwrap().access_token;

        for header in [
            token.clone(),
            format!("bearer {}", token),
            format!("Token {}", token),
            format!("Bearer  {}", token),
            format!("Bearer {} extra", token),
            "Bearer ".to_string(),
            "Bearer".to_string(),
        ] {
            let (status, _) = call_with_header(sessions.clone(), Some(header.clone())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {:?}", header);
        }
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted_as_access() {
        let (sessions, _) = sessions();
        let pair = sessions.new_pair(Uuid::new_v4()).unwrap();

        let (status, _) =
            call_with_header(sessions, Some(format!("Bearer {}", pair.refresh_token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_expired_access_token_is_unauthorized() {
        let (sessions, clock) = sessions();
        let pair = sessions.new_pair(Uuid::new_v4()).unwrap();
        clock.advance(Duration::from_secs(901));

        let (status, body) =
            call_with_header(sessions, Some(format!("Bearer {}", pair.access_token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "unauthorized");
    }
}
