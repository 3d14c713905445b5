//! # Route Configuration
//!
//! | Scope | 보호 | Endpoints |
//! |-------|------|-----------|
//! | `/api/v1/auth` | - | `POST /sign-up`, `POST /sign-in`, `POST /refresh` |
//! | `/api/v1/user` | Bearer | `GET ""`, `POST /log-out` |
//! | `/api/v1/ping` | - | `GET` |
//! | `/health` | - | `GET` |

use crate::core::AppContext;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::{get, web, HttpResponse};
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig, ctx: &web::Data<AppContext>) {
    cfg.service(health_check);
    cfg.service(ping);

    configure_auth_routes(cfg);
    configure_user_routes(cfg, ctx);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::sign_up)
            .service(handlers::auth::sign_in)
            .service(handlers::auth::refresh),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig, ctx: &web::Data<AppContext>) {
    cfg.service(
        web::scope("/api/v1/user")
            .wrap(AuthMiddleware::new(ctx.sessions.clone()))
            .service(handlers::users::get_current_user)
            .service(handlers::auth::log_out),
    );
}

#[get("/api/v1/ping")]
async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "pong" }))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "pocket_link_auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "users": "MongoDB",
            "sessions": "Redis",
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogoutScope;
    use crate::core::context::tests::test_context;
    use crate::services::auth::token_service::tests::ManualClock;
    use actix_web::cookie::{time, Cookie};
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;
    use std::time::Duration;

    const HOST: &str = "links.example.com:8080";

    fn alice() -> Value {
        json!({ "name": "Alice", "email": "a@example.com", "password": "Secret123" })
    }

    /// 응답의 `refresh_token` Set-Cookie
    fn refresh_cookie_of<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == "refresh_token")
            .map(|c| c.into_owned())
    }

    macro_rules! app {
        ($clock:expr, $scope:expr) => {{
            let ctx = web::Data::new(test_context($clock, $scope));
            test::init_service(
                App::new()
                    .app_data(ctx.clone())
                    .configure(|cfg| configure_all_routes(cfg, &ctx)),
            )
            .await
        }};
    }

    /// 가입 후 (액세스 토큰, 리프레시 쿠키)
    macro_rules! sign_up {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/sign-up")
                .insert_header(("Host", HOST))
                .set_json(alice())
                .to_request();
            let resp = test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let cookie = refresh_cookie_of(&resp).unwrap();
            let access: String = test::read_body_json(resp).await;
            (access, cookie)
        }};
    }

    #[actix_web::test]
    async fn test_sign_up_use_log_out_then_refresh_fails() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);
        let (access, cookie) = sign_up!(&app);

        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("links.example.com"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));

        let req = test::TestRequest::get()
            .uri("/api/v1/user")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let profile: Value = test::read_body_json(resp).await;
        assert_eq!(profile["email"], "a@example.com");
        assert_eq!(profile["name"], "Alice");
        assert!(profile.get("password_hash").is_none());

        let req = test::TestRequest::post()
            .uri("/api/v1/user/log-out")
            .insert_header(("Host", HOST))
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let cleared = refresh_cookie_of(&resp).unwrap();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_sign_in_returns_access_token_and_cookie() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);
        sign_up!(&app);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/sign-in")
            .insert_header(("Host", HOST))
            .set_json(json!({ "email": "a@example.com", "password": "Secret123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(refresh_cookie_of(&resp).is_some());

        let access: String = test::read_body_json(resp).await;
        assert_eq!(access.split('.').count(), 3);
    }

    #[actix_web::test]
    async fn test_sign_in_with_wrong_password_is_unauthorized() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);
        sign_up!(&app);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/sign-in")
            .set_json(json!({ "email": "a@example.com", "password": "Secret124" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(refresh_cookie_of(&resp).is_none());
    }

    #[actix_web::test]
    async fn test_sign_in_with_malformed_email_is_bad_request() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);
        sign_up!(&app);

        for email in ["x", "a@example"] {
            let req = test::TestRequest::post()
                .uri("/api/v1/auth/sign-in")
                .set_json(json!({ "email": email, "password": "Secret123" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert!(refresh_cookie_of(&resp).is_none());
        }
    }

    #[actix_web::test]
    async fn test_sign_up_validation_and_duplicates() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/sign-up")
            .set_json(json!({ "name": "alice", "email": "a@example.com", "password": "secret" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        sign_up!(&app);
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/sign-up")
            .set_json(alice())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CONFLICT
        );
    }

    #[actix_web::test]
    async fn test_refresh_rotates_and_old_token_is_single_use() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);
        let (_, original) = sign_up!(&app);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .insert_header(("Host", HOST))
            .cookie(original.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let rotated = refresh_cookie_of(&resp).unwrap();
        assert_ne!(rotated.value(), original.value());

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(original)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        // 쿠키 대신 본문으로도 전달 가능
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": rotated.value() }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_refresh_without_token_is_unauthorized() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);
        let req = test::TestRequest::post().uri("/api/v1/auth/refresh").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_expired_refresh_cookie_is_unauthorized() {
        let clock = ManualClock::starting_at(1_700_000_000);
        let app = app!(clock.clone(), LogoutScope::User);
        let (_, cookie) = sign_up!(&app);

        clock.advance(Duration::from_secs(3601));
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_session_scoped_log_out_keeps_other_sessions() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::Session);
        let (access, laptop) = sign_up!(&app);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/sign-in")
            .set_json(json!({ "email": "a@example.com", "password": "Secret123" }))
            .to_request();
        let phone = refresh_cookie_of(&test::call_service(&app, req).await).unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/user/log-out")
            .insert_header(("Authorization", format!("Bearer {}", access)))
            .cookie(laptop.clone())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(laptop)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(phone)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_protected_routes_require_bearer() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);

        let req = test::TestRequest::get().uri("/api/v1/user").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post().uri("/api/v1/user/log-out").to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_ping_and_health() {
        let app = app!(ManualClock::starting_at(1_700_000_000), LogoutScope::User);

        let req = test::TestRequest::get().uri("/api/v1/ping").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "message": "pong" }));

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
    }
}
