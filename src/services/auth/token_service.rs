//! JWT 토큰 발급/검증 서비스
//!
//! 액세스 토큰과 리프레시 토큰을 HS256 으로 서명하고 검증합니다.
//! 두 종류는 서로 다른 서명 키를 사용하므로 한 종류의 토큰을 다른 종류로 제시하면
//! 서명 검증 단계에서 거부됩니다.
//!
//! # 클레임
//!
//! | 클레임 | 값 |
//! |--------|----|
//! | `jti` | 호출마다 새로 만드는 UUID v4 |
//! | `iss`, `aud` | 설정의 고정값 |
//! | `sub` | 사용자 UUID |
//! | `iat`, `exp` | 주입된 [`Clock`] 기준 (초, `exp`는 올림) |
//!
//! # 만료 판정
//!
//! `now >= exp` 이면 만료입니다. 시계를 주입받으므로 테스트에서 경계 시각을 정확히 재현할 수 있습니다.
//!
//! ```rust,ignore
//! let issuer = TokenIssuer::new(&jwt_config, Arc::new(SystemClock))?;
//! let token = issuer.issue(user_id, Duration::from_secs(900), TokenKind::Access)?;
//! let claims = issuer.validate(&token, TokenKind::Access)?;
//! assert_eq!(claims.sub, user_id);
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::models::token::{Claims, TokenKind};
use crate::errors::AppError;

/// 현재 시각 공급자
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("unexpected signing algorithm")]
    InvalidAlgorithm,

    #[error("issuer mismatch")]
    InvalidIssuer,

    #[error("audience mismatch")]
    InvalidAudience,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("subject must be a non-nil uuid")]
    EmptySubject,

    #[error("ttl must be positive, got {0:?}")]
    InvalidTtl(Duration),

    #[error("missing {0} signing secret")]
    MissingSecret(TokenKind),

    #[error("signing failed: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::EmptySubject
            | TokenError::InvalidTtl(_)
            | TokenError::MissingSecret(_)
            | TokenError::Signing(_) => AppError::InternalError(err.to_string()),
            _ => AppError::AuthenticationError(err.to_string()),
        }
    }
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str, kind: TokenKind) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret(kind));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }
}

/// 상태 없는 토큰 발급기. 서명 키와 시계만 보유합니다.
pub struct TokenIssuer {
    access: SigningKeys,
    refresh: SigningKeys,
    issuer: String,
    audience: String,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        Ok(Self {
            access: SigningKeys::from_secret(&config.access_secret, TokenKind::Access)?,
            refresh: SigningKeys::from_secret(&config.refresh_secret, TokenKind::Refresh)?,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            clock,
        })
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// 서명된 토큰을 발급합니다.
    pub fn issue(&self, subject: Uuid, ttl: Duration, kind: TokenKind) -> Result<String, TokenError> {
        if subject.is_nil() {
            return Err(TokenError::EmptySubject);
        }
        let ttl_delta = chrono::Duration::from_std(ttl)
            .ok()
            .filter(|d| *d > chrono::Duration::zero())
            .ok_or(TokenError::InvalidTtl(ttl))?;

        let now = self.clock.now();
        let claims = Claims {
            jti: Uuid::new_v4(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: subject,
            iat: now.timestamp(),
            exp: ceil_seconds(now + ttl_delta),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(kind).encoding,
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// 서명, 알고리즘, 발급자, 대상, 만료를 검증하고 클레임을 반환합니다.
    pub fn validate(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // 만료는 주입된 시계로 직접 판정한다
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.keys(kind).decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::InvalidAlgorithm
                }
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                ErrorKind::InvalidAudience => TokenError::InvalidAudience,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.sub.is_nil() {
            return Err(TokenError::EmptySubject);
        }

        Ok(claims)
    }

    /// 서명을 검증한 뒤 만료 여부와 관계없이 클레임을 꺼냅니다.
    /// 만료된 리프레시 쿠키로 로그아웃할 때 세션 ID를 찾는 용도입니다.
    pub fn claims_ignoring_expiry(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        match self.validate(token, kind) {
            Ok(claims) => Ok(claims),
            Err(TokenError::Expired) => {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.set_issuer(&[self.issuer.as_str()]);
                validation.set_audience(&[self.audience.as_str()]);
                validation.validate_exp = false;
                decode::<Claims>(token, &self.keys(kind).decoding, &validation)
                    .map(|data| data.claims)
                    .map_err(|e| TokenError::Malformed(e.to_string()))
            }
            Err(other) => Err(other),
        }
    }
}

/// `exp`는 초 단위로 올림합니다. 1초 미만 TTL 토큰도 발급 시점에는 유효합니다.
fn ceil_seconds(at: DateTime<Utc>) -> i64 {
    if at.timestamp_subsec_nanos() > 0 {
        at.timestamp() + 1
    } else {
        at.timestamp()
    }
}
