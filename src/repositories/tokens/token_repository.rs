//! # 리프레시 세션 저장소
//!
//! 리프레시 토큰을 `"<userUUID>:<tokenUUID>"` 키로 보관하는 저장소입니다.
//! 서비스 계층은 [`RefreshStore`] trait 에만 의존하고, [`TokenRepository`]가
//! 임의의 [`KeyValueBackend`] 위에서 이를 구현합니다.
//!
//! ## 조회 방식
//!
//! | 연산 | 백엔드 호출 | 결과 |
//! |------|------------|------|
//! | `get_by_composite_key` | `GET key` | 정확히 1개 또는 `NotFound` |
//! | `get_by_user_id` | `SCAN user:*` → `MGET` | 0개 이상 |
//! | `get_by_token_id` | `SCAN *:token` → `GET` | 정확히 1개, 2개 이상은 `Ambiguous` |
//! | `delete_all_for_*` | `SCAN` → `DEL` | 삭제된 개수 |
//!
//! 스캔 후 읽기/삭제는 원자적이지 않습니다. 스캔과 삭제 사이에 저장된 세션은 살아남을 수 있고,
//! 스캔과 읽기 사이에 만료된 키는 결과에서 빠집니다.
//!
//! ## 에러 구분
//!
//! 백엔드 장애([`StoreError::Backend`])와 "없음"([`StoreError::NotFound`])은 항상 다른 변형입니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::caching::{CacheError, KeyValueBackend};
use crate::domain::models::token::{fingerprint, CompositeKey, MalformedKey, Token};
use crate::errors::AppError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("session store backend failure: {0}")]
    Backend(#[from] CacheError),

    #[error("session not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    MalformedKey(#[from] MalformedKey),

    #[error("token id {token_id} matched {matches} session keys")]
    Ambiguous { token_id: Uuid, matches: usize },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Backend(e) => AppError::RedisError(e.to_string()),
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            anomaly @ (StoreError::MalformedKey(_) | StoreError::Ambiguous { .. }) => {
                AppError::InvariantViolation(anomaly.to_string())
            }
        }
    }
}

/// 리프레시 세션 저장소 capability
#[async_trait]
pub trait RefreshStore: Send + Sync {
    /// 세션을 저장합니다. 같은 키가 있으면 덮어씁니다.
    async fn put(&self, token: &Token, ttl: Duration) -> Result<(), StoreError>;

    async fn get_by_composite_key(&self, key: &CompositeKey) -> Result<Token, StoreError>;

    /// 사용자의 모든 활성 세션. 없으면 빈 목록입니다.
    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Vec<Token>, StoreError>;

    /// 토큰 ID로 세션 하나를 찾습니다.
    async fn get_by_token_id(&self, token_id: Uuid) -> Result<Token, StoreError>;

    /// 키를 삭제합니다. 없는 키도 성공이며, 실제로 지웠는지를 반환합니다.
    async fn delete(&self, key: &CompositeKey) -> Result<bool, StoreError>;

    /// "모든 기기에서 로그아웃"
    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, StoreError>;

    async fn delete_all_for_token(&self, token_id: Uuid) -> Result<u64, StoreError>;
}

pub struct TokenRepository {
    backend: Arc<dyn KeyValueBackend>,
}

impl TokenRepository {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// 스캔 결과 키를 해석합니다. 패턴에 걸렸지만 형식이 틀린 키는 상태 이상입니다.
    fn parse_keys(keys: &[String]) -> Result<Vec<CompositeKey>, StoreError> {
        keys.iter()
            .map(|raw| raw.parse::<CompositeKey>().map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl RefreshStore for TokenRepository {
    async fn put(&self, token: &Token, ttl: Duration) -> Result<(), StoreError> {
        let key = token.key().to_string();
        self.backend
            .set_with_expiry(&key, &token.refresh_token, ttl)
            .await?;

        log::debug!(
            "리프레시 세션 저장 - key: {}, token: {}, ttl: {}초",
            key,
            fingerprint(&token.refresh_token),
            ttl.as_secs()
        );
        Ok(())
    }

    async fn get_by_composite_key(&self, key: &CompositeKey) -> Result<Token, StoreError> {
        let value = self
            .backend
            .get(&key.to_string())
            .await?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        Ok(Token {
            id: key.token_id,
            user_id: key.user_id,
            refresh_token: value,
        })
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Vec<Token>, StoreError> {
        let raw_keys = self
            .backend
            .scan_keys(&CompositeKey::user_pattern(user_id))
            .await?;
        if raw_keys.is_empty() {
            return Ok(Vec::new());
        }

        let keys = Self::parse_keys(&raw_keys)?;
        let values = self.backend.get_many(&raw_keys).await?;

        // 스캔과 MGET 사이에 만료된 키는 None 으로 돌아온다
        Ok(keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| {
                value.map(|refresh_token| Token {
                    id: key.token_id,
                    user_id: key.user_id,
                    refresh_token,
                })
            })
            .collect())
    }

    async fn get_by_token_id(&self, token_id: Uuid) -> Result<Token, StoreError> {
        let raw_keys = self
            .backend
            .scan_keys(&CompositeKey::token_pattern(token_id))
            .await?;

        let key = match raw_keys.as_slice() {
            [] => return Err(StoreError::NotFound(format!("*:{}", token_id))),
            [only] => only.parse::<CompositeKey>()?,
            many => {
                log::error!(
                    "토큰 ID {}에 세션 키 {}개가 매칭되었습니다: {:?}",
                    token_id,
                    many.len(),
                    many
                );
                return Err(StoreError::Ambiguous {
                    token_id,
                    matches: many.len(),
                });
            }
        };

        self.get_by_composite_key(&key).await
    }

    async fn delete(&self, key: &CompositeKey) -> Result<bool, StoreError> {
        let removed = self.backend.delete(&[key.to_string()]).await?;
        Ok(removed > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let keys = self
            .backend
            .scan_keys(&CompositeKey::user_pattern(user_id))
            .await?;
        let removed = self.backend.delete(&keys).await?;

        log::info!("사용자 {}의 리프레시 세션 {}개 삭제", user_id, removed);
        Ok(removed)
    }

    async fn delete_all_for_token(&self, token_id: Uuid) -> Result<u64, StoreError> {
        let keys = self
            .backend
            .scan_keys(&CompositeKey::token_pattern(token_id))
            .await?;
        if keys.len() > 1 {
            log::warn!(
                "토큰 ID {}에 세션 키 {}개가 매칭되어 모두 삭제합니다",
                token_id,
                keys.len()
            );
        }
        Ok(self.backend.delete(&keys).await?)
    }
}
