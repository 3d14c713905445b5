//! Authentication HTTP Handlers
//!
//! 가입, 로그인, 토큰 갱신, 로그아웃 엔드포인트입니다.
//!
//! # 응답 형식
//!
//! 세션을 발급하는 엔드포인트는 본문에 액세스 토큰 문자열 하나(JSON string)를 담고,
//! 리프레시 토큰은 `refresh_token` HttpOnly 쿠키로 내려줍니다.
//!
//! | Endpoint | 성공 |
//! |----------|------|
//! | `POST /api/v1/auth/sign-up` | 201 + `"<access>"` + 쿠키 |
//! | `POST /api/v1/auth/sign-in` | 200 + `"<access>"` + 쿠키 |
//! | `POST /api/v1/auth/refresh` | 200 + `"<access>"` + 새 쿠키 |
//! | `POST /api/v1/user/log-out` | 204 + 만료된 쿠키 |

use std::time::Duration;

use actix_web::cookie::{time, Cookie};
use actix_web::{post, web, HttpRequest, HttpResponse, HttpResponseBuilder};
use validator::Validate;

use crate::config::SessionConfig;
use crate::core::AppContext;
use crate::domain::dto::users::request::{CreateUserRequest, RefreshTokenRequest, SignInRequest};
use crate::domain::{AuthenticatedUser, TokenPair};
use crate::errors::AppError;

pub const REFRESH_COOKIE: &str = "refresh_token";

/// 회원가입 후 바로 세션을 발급합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/sign-up`
#[post("/sign-up")]
pub async fn sign_up(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = ctx.users.sign_up(payload.into_inner()).await?;
    let pair = ctx.sessions.issue_session(user.id).await?;

    Ok(session_response(HttpResponse::Created(), &req, &ctx, pair))
}

/// 로컬 로그인
///
/// # Endpoint
/// `POST /api/v1/auth/sign-in`
#[post("/sign-in")]
pub async fn sign_in(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    payload: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = ctx
        .users
        .get_by_credentials(&payload.email, &payload.password)
        .await?;
    let pair = ctx.sessions.issue_session(user.id).await?;

    log::info!("로컬 로그인 성공 - 사용자 ID: {}", user.id);
    Ok(session_response(HttpResponse::Ok(), &req, &ctx, pair))
}

/// 리프레시 토큰을 소비하고 새 토큰 쌍을 발급합니다.
///
/// 쿠키를 우선 사용하고, 없으면 `{"refresh_token": "..."}` 본문을 봅니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = req
        .cookie(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| body.map(|b| b.into_inner().refresh_token))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("리프레시 토큰이 없습니다".to_string()))?;

    let pair = ctx.sessions.rotate(&refresh_token).await?;
    Ok(session_response(HttpResponse::Ok(), &req, &ctx, pair))
}

/// 세션을 폐기하고 리프레시 쿠키를 지웁니다.
///
/// # Endpoint
/// `POST /api/v1/user/log-out` (인증 필요)
#[post("/log-out")]
pub async fn log_out(
    req: HttpRequest,
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let presented = req.cookie(REFRESH_COOKIE);
    let scope = ctx.session_config.logout_scope;

    let removed = ctx
        .sessions
        .log_out(&user, presented.as_ref().map(|c| c.value()), scope)
        .await?;
    log::info!(
        "로그아웃 - 사용자 ID: {}, 범위: {:?}, 폐기된 세션: {}",
        user.user_id,
        scope,
        removed
    );

    let cleared = refresh_cookie(&req, &ctx.session_config, String::new(), Duration::ZERO);
    Ok(HttpResponse::NoContent().cookie(cleared).finish())
}

fn session_response(
    mut builder: HttpResponseBuilder,
    req: &HttpRequest,
    ctx: &AppContext,
    pair: TokenPair,
) -> HttpResponse {
    let TokenPair {
        access_token,
        refresh_token,
    } = pair;
    let cookie = refresh_cookie(
        req,
        &ctx.session_config,
        refresh_token,
        ctx.sessions.refresh_ttl(),
    );

    builder.cookie(cookie).json(access_token)
}

/// `refresh_token` 쿠키. 도메인은 설정값, 없으면 요청 호스트(포트 제외)입니다.
pub(crate) fn refresh_cookie(
    req: &HttpRequest,
    config: &SessionConfig,
    value: String,
    max_age: Duration,
) -> Cookie<'static> {
    let domain = match &config.cookie_domain {
        Some(domain) => domain.clone(),
        None => host_without_port(req.connection_info().host()).to_string(),
    };
    let max_age = time::Duration::seconds(i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX));

    Cookie::build(REFRESH_COOKIE, value)
        .path("/")
        .domain(domain)
        .http_only(true)
        .secure(config.cookie_secure)
        .max_age(max_age)
        .finish()
}

fn host_without_port(host: &str) -> &str {
    // [::1]:8080
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogoutScope;
    use actix_web::test::TestRequest;

    #[test]
    fn test_host_without_port() {
        assert_eq!(host_without_port("links.example.com:8080"), "links.example.com");
        assert_eq!(host_without_port("links.example.com"), "links.example.com");
        assert_eq!(host_without_port("[::1]:8080"), "[::1]");
        assert_eq!(host_without_port("127.0.0.1:3000"), "127.0.0.1");
    }

    #[test]
    fn test_refresh_cookie_attributes_follow_request_host() {
        let req = TestRequest::default()
            .insert_header(("Host", "links.example.com:8080"))
            .to_http_request();
        let cookie = refresh_cookie(
            &req,
            &SessionConfig::default(),
            "token".to_string(),
            Duration::from_secs(3600),
        );

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("links.example.com"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn test_refresh_cookie_uses_configured_domain_and_secure() {
        let req = TestRequest::default()
            .insert_header(("Host", "internal:9000"))
            .to_http_request();
        let config = SessionConfig {
            cookie_secure: true,
            cookie_domain: Some("example.com".to_string()),
            logout_scope: LogoutScope::User,
        };
        let cookie = refresh_cookie(&req, &config, String::new(), Duration::ZERO);

        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
