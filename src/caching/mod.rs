//! 키-값 저장소 계층 모듈
//!
//! 리프레시 세션 상태를 보관하는 TTL 기반 키-값 저장소를 추상화합니다.
//! 상위 계층은 [`KeyValueBackend`] trait 에만 의존하며, 구현체는 두 가지입니다.
//!
//! - [`redis::RedisClient`] - 운영용 Redis 백엔드 (`SCAN`, `MGET`, `SET PX`, `DEL`)
//! - [`memory::InMemoryBackend`] - 단일 프로세스용 구현 (개발 및 테스트)
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use crate::caching::{KeyValueBackend, redis::RedisClient};
//!
//! let backend = RedisClient::connect("redis://localhost:6379").await?;
//! backend.set_with_expiry("user:token", "value", Duration::from_secs(60)).await?;
//! let keys = backend.scan_keys("user:*").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod redis;

/// 백엔드 호출 실패
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("redis: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("in-memory backend lock poisoned")]
    Poisoned,

    #[error("invalid ttl: {0:?}")]
    InvalidTtl(Duration),
}

/// TTL을 지원하는 문자열 키-값 저장소
///
/// 스캔 패턴은 `<prefix>*` 또는 `*<suffix>` 형태만 사용합니다. Redis 는 이를 glob 으로 해석합니다.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// 여러 키의 값을 입력 순서대로 조회합니다. 없는 키는 `None`입니다.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>, CacheError>;

    /// 패턴과 일치하는 모든 키를 반환합니다. 결과 순서는 보장하지 않습니다.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;

    /// 값을 저장하고 만료 시간을 설정합니다. 기존 값은 덮어씁니다.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration)
        -> Result<(), CacheError>;

    /// 키들을 삭제하고 실제로 삭제된 개수를 반환합니다.
    async fn delete(&self, keys: &[String]) -> Result<u64, CacheError>;
}
