//! # Authentication Configuration Module
//!
//! JWT 서명 키, 토큰 수명, 리프레시 쿠키, 로그아웃 범위 등
//! 인증 관련 설정을 관리하는 모듈입니다.
//!
//! 모든 값은 시작 시 한 번 환경 변수에서 읽어 구조체로 고정되며,
//! 이후 서비스 생성자에 그대로 전달됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 토큰 종류별 HMAC 서명 키 (프로덕션 필수)
//! export AUTH_ACCESS_SECRET="access-secret"
//! export AUTH_REFRESH_SECRET="refresh-secret"
//!
//! # 클레임 고정값
//! export JWT_ISSUER="pocket-link"
//! export JWT_AUDIENCE="pocket-link-clients"
//!
//! # 토큰 수명 (초)
//! export JWT_ACCESS_TTL_SECONDS="900"
//! export JWT_REFRESH_TTL_SECONDS="2592000"
//!
//! # 리프레시 쿠키와 로그아웃 범위
//! export AUTH_COOKIE_SECURE="true"
//! export AUTH_COOKIE_DOMAIN="pocket.example.com"
//! export AUTH_LOGOUT_SCOPE="user"   # user | session
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, JwtConfig, SessionConfig};
//!
//! let env = Environment::current();
//! let jwt = JwtConfig::from_env(&env)?;
//! let session = SessionConfig::from_env(&env);
//! ```

use std::env;
use std::time::Duration;

use crate::config::Environment;
use crate::errors::AppError;

const DEFAULT_ACCESS_TTL_SECONDS: u64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// JWT 발급 및 검증 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 액세스 토큰 전용 HMAC 키
    pub access_secret: String,
    /// 리프레시 토큰 전용 HMAC 키
    pub refresh_secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtConfig {
    /// 환경 변수에서 JWT 설정을 로드합니다.
    ///
    /// 프로덕션에서 서명 키가 비어 있으면 에러를 반환합니다.
    /// 그 외 환경에서는 개발용 기본 키를 경고와 함께 사용합니다.
    pub fn from_env(env: &Environment) -> Result<Self, AppError> {
        let access_secret = Self::secret("AUTH_ACCESS_SECRET", "dev-access-secret", env)?;
        let refresh_secret = Self::secret("AUTH_REFRESH_SECRET", "dev-refresh-secret", env)?;

        if access_secret == refresh_secret {
            log::warn!("액세스/리프레시 서명 키가 동일합니다. 토큰 종류 간 위조를 막으려면 서로 다른 키를 사용하세요");
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "pocket-link".to_string()),
            audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "pocket-link-clients".to_string()),
            access_ttl: ttl_seconds("JWT_ACCESS_TTL_SECONDS", DEFAULT_ACCESS_TTL_SECONDS),
            refresh_ttl: ttl_seconds("JWT_REFRESH_TTL_SECONDS", DEFAULT_REFRESH_TTL_SECONDS),
        })
    }

    fn secret(key: &str, dev_default: &str, env: &Environment) -> Result<String, AppError> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ if env.is_production() => Err(AppError::InternalError(format!(
                "{} 환경 변수가 설정되지 않았습니다",
                key
            ))),
            _ => {
                log::warn!("{} not set, using default (not secure for production!)", key);
                Ok(dev_default.to_string())
            }
        }
    }
}

fn ttl_seconds(key: &str, default: u64) -> Duration {
    let seconds = match env::var(key) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(value) if value > 0 => value,
            _ => {
                log::warn!("{} 값이 올바르지 않습니다: {}. 기본값 {}초 사용", key, raw, default);
                default
            }
        },
        Err(_) => default,
    };
    Duration::from_secs(seconds)
}

/// 로그아웃 시 무효화할 리프레시 세션 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutScope {
    /// 사용자의 모든 세션 (모든 기기에서 로그아웃)
    User,
    /// 요청에 제시된 리프레시 쿠키의 세션 하나
    Session,
}

impl LogoutScope {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "session" | "token" => LogoutScope::Session,
            _ => LogoutScope::User,
        }
    }
}

/// 리프레시 쿠키 및 세션 정책 설정
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 쿠키 `Secure` 속성
    pub cookie_secure: bool,
    /// 고정 쿠키 도메인. `None`이면 요청 호스트(포트 제외)를 사용합니다.
    pub cookie_domain: Option<String>,
    pub logout_scope: LogoutScope,
}

impl SessionConfig {
    pub fn from_env(env: &Environment) -> Self {
        let cookie_secure = match env::var("AUTH_COOKIE_SECURE") {
            Ok(raw) => matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
            Err(_) => env.is_production(),
        };

        let cookie_domain = env::var("AUTH_COOKIE_DOMAIN")
            .ok()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let logout_scope = LogoutScope::from_str(
            &env::var("AUTH_LOGOUT_SCOPE").unwrap_or_else(|_| "user".to_string()),
        );

        if !cookie_secure {
            log::warn!("리프레시 쿠키에 Secure 속성이 꺼져 있습니다 (AUTH_COOKIE_SECURE)");
        }

        Self {
            cookie_secure,
            cookie_domain,
            logout_scope,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_secure: false,
            cookie_domain: None,
            logout_scope: LogoutScope::User,
        }
    }
}
