//! 세션 수명주기 서비스
//!
//! [`TokenIssuer`]와 [`RefreshStore`]를 묶어 로그인, 갱신, 로그아웃 시나리오를 처리합니다.
//!
//! # 흐름
//!
//! ```text
//! sign-up / sign-in ─▶ issue_session ─▶ new_pair ─▶ save_refresh_token ─▶ (access, refresh)
//! refresh           ─▶ rotate ─▶ validate_refresh ─▶ 저장된 세션 확인 ─▶ 삭제 ─▶ issue_session
//! log-out           ─▶ log_out ─▶ invalidate_by_user | invalidate_by_token_id
//! ```
//!
//! # 실패 분류
//!
//! - 위조/만료/형식 오류 토큰, 폐기된 세션 → `AuthenticationError` (401)
//! - 저장소 장애, 상태 이상, 서명 실패 → 500 계열
//!
//! 리프레시 토큰 저장이 실패하면 토큰 쌍은 호출자에게 반환되지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::config::{JwtConfig, LogoutScope};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::{fingerprint, Claims, CompositeKey, Token, TokenKind, TokenPair};
use crate::errors::AppError;
use crate::repositories::tokens::{RefreshStore, StoreError};
use crate::services::auth::token_service::TokenIssuer;

pub struct SessionService {
    issuer: TokenIssuer,
    store: Arc<dyn RefreshStore>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionService {
    pub fn new(issuer: TokenIssuer, store: Arc<dyn RefreshStore>, config: &JwtConfig) -> Self {
        Self {
            issuer,
            store,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// 액세스/리프레시 토큰 쌍을 발급합니다. 저장하지 않습니다.
    pub fn new_pair(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        let access_token = self.issuer.issue(user_id, self.access_ttl, TokenKind::Access)?;
        let refresh_token = self.issuer.issue(user_id, self.refresh_ttl, TokenKind::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 방금 발급한 리프레시 토큰을 해석해 `(sub, jti)` 키로 저장합니다.
    pub async fn save_refresh_token(&self, refresh_token: &str) -> Result<Token, AppError> {
        // 직전에 발급한 토큰이므로 해석 실패는 클라이언트 잘못이 아니다
        let claims = self
            .issuer
            .validate(refresh_token, TokenKind::Refresh)
            .map_err(|e| AppError::InternalError(format!("발급한 리프레시 토큰 해석 실패: {}", e)))?;

        let token = Token {
            id: claims.jti,
            user_id: claims.sub,
            refresh_token: refresh_token.to_string(),
        };
        self.store.put(&token, self.refresh_ttl).await?;
        Ok(token)
    }

    pub fn validate_access(&self, token: &str) -> Result<Claims, AppError> {
        Ok(self.issuer.validate(token, TokenKind::Access)?)
    }

    pub fn validate_refresh(&self, token: &str) -> Result<Claims, AppError> {
        Ok(self.issuer.validate(token, TokenKind::Refresh)?)
    }

    pub async fn invalidate_by_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(self.store.delete_all_for_user(user_id).await?)
    }

    pub async fn invalidate_by_token_id(&self, token_id: Uuid) -> Result<u64, AppError> {
        Ok(self.store.delete_all_for_token(token_id).await?)
    }

    /// 새 세션을 시작합니다: 토큰 쌍 발급 후 리프레시 토큰 저장.
    pub async fn issue_session(&self, user_id: Uuid) -> Result<TokenPair, AppError> {
        let pair = self.new_pair(user_id)?;
        let saved = self.save_refresh_token(&pair.refresh_token).await?;

        log::info!("세션 발급 - 사용자: {}, 세션: {}", user_id, saved.id);
        Ok(pair)
    }

    /// 리프레시 토큰을 소비하고 새 토큰 쌍을 발급합니다.
    ///
    /// 저장된 세션을 삭제한 요청만 새 쌍을 받으므로 같은 토큰으로 동시에 갱신해도
    /// 하나만 성공합니다.
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.validate_refresh(refresh_token)?;
        let key = CompositeKey::new(claims.sub, claims.jti);

        let stored = match self.store.get_by_composite_key(&key).await {
            Ok(stored) => stored,
            Err(StoreError::NotFound(_)) => {
                return Err(AppError::AuthenticationError(format!(
                    "폐기되었거나 만료된 세션입니다: {}",
                    key
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if stored.refresh_token != refresh_token {
            log::warn!(
                "저장된 세션과 제시된 토큰이 다릅니다 - key: {}, 제시: {}, 저장: {}",
                key,
                fingerprint(refresh_token),
                fingerprint(&stored.refresh_token)
            );
            return Err(AppError::AuthenticationError("세션 토큰 불일치".to_string()));
        }

        if !self.store.delete(&key).await? {
            return Err(AppError::AuthenticationError(format!(
                "이미 사용된 리프레시 토큰입니다: {}",
                key
            )));
        }

        self.issue_session(claims.sub).await
    }

    /// 설정된 범위에 따라 세션을 폐기합니다.
    ///
    /// `Session` 범위에서는 제시된 리프레시 토큰이 요청 사용자 것일 때만 그 세션 하나를 지우고,
    /// 그렇지 않으면 사용자의 모든 세션을 지웁니다.
    pub async fn log_out(
        &self,
        user: &AuthenticatedUser,
        refresh_token: Option<&str>,
        scope: LogoutScope,
    ) -> Result<u64, AppError> {
        if scope == LogoutScope::Session {
            let own_session = refresh_token
                .and_then(|t| self.issuer.claims_ignoring_expiry(t, TokenKind::Refresh).ok())
                .filter(|claims| claims.sub == user.user_id);

            match own_session {
                Some(claims) => return self.invalidate_by_token_id(claims.jti).await,
                None => log::info!(
                    "로그아웃할 세션을 특정할 수 없어 사용자 {}의 모든 세션을 폐기합니다",
                    user.user_id
                ),
            }
        }

        self.invalidate_by_user(user.user_id).await
    }

    /// 사용자의 세션 중 가장 최근에 발급된 것 (`iat` 기준)
    pub async fn latest_session(&self, user_id: Uuid) -> Result<Option<Token>, AppError> {
        let sessions = self.store.get_by_user_id(user_id).await?;

        Ok(sessions
            .into_iter()
            .filter_map(|token| {
                match self
                    .issuer
                    .claims_ignoring_expiry(&token.refresh_token, TokenKind::Refresh)
                {
                    Ok(claims) => Some((claims.iat, token)),
                    Err(e) => {
                        log::warn!("해석할 수 없는 세션 값 - key: {}, 사유: {}", token.key(), e);
                        None
                    }
                }
            })
            .max_by_key(|(iat, _)| *iat)
            .map(|(_, token)| token))
    }
}
