//! JWT 클레임, 토큰 쌍, 리프레시 세션 레코드
//!
//! 리프레시 세션은 `"<userUUID>:<tokenUUID>"` 형태의 복합 키로 저장됩니다.
//! 키 포맷은 [`CompositeKey`] 한 곳에서만 만들고 해석합니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

const KEY_SEPARATOR: char = ':';

/// 토큰 종류. 종류마다 서로 다른 서명 키를 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// 서명된 토큰에 담기는 클레임
///
/// `sub`와 `jti`는 UUID로 역직렬화되므로 형식이 틀린 토큰은 검증 단계에서 거부됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub jti: Uuid,
    pub iss: String,
    pub aud: String,
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// 발급 직후의 토큰 쌍. 하나의 단위로 저장되지 않습니다.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 저장소에 보관되는 리프레시 세션 레코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 리프레시 토큰의 `jti`
    pub id: Uuid,
    /// 리프레시 토큰의 `sub`
    pub user_id: Uuid,
    pub refresh_token: String,
}

impl Token {
    pub fn key(&self) -> CompositeKey {
        CompositeKey::new(self.user_id, self.id)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("malformed session key: {0:?}")]
pub struct MalformedKey(pub String);

/// `"<userUUID>:<tokenUUID>"` 복합 키 코덱
///
/// ```rust,ignore
/// let key = CompositeKey::new(user_id, token_id);
/// let raw = key.to_string();
/// assert_eq!(raw.parse::<CompositeKey>()?, key);
///
/// let by_user = CompositeKey::user_pattern(user_id);    // "<user>:*"
/// let by_token = CompositeKey::token_pattern(token_id); // "*:<token>"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub user_id: Uuid,
    pub token_id: Uuid,
}

impl CompositeKey {
    pub fn new(user_id: Uuid, token_id: Uuid) -> Self {
        Self { user_id, token_id }
    }

    /// 한 사용자의 모든 세션 키와 일치하는 스캔 패턴
    pub fn user_pattern(user_id: Uuid) -> String {
        format!("{}{}*", user_id.hyphenated(), KEY_SEPARATOR)
    }

    /// 특정 토큰 ID의 세션 키와 일치하는 스캔 패턴
    pub fn token_pattern(token_id: Uuid) -> String {
        format!("*{}{}", KEY_SEPARATOR, token_id.hyphenated())
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.user_id.hyphenated(),
            KEY_SEPARATOR,
            self.token_id.hyphenated()
        )
    }
}

impl FromStr for CompositeKey {
    type Err = MalformedKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || MalformedKey(raw.to_string());

        let (user, token) = raw.split_once(KEY_SEPARATOR).ok_or_else(malformed)?;
        // Uuid::parse_str은 여러 표기를 허용하므로 정규형과 다시 비교한다
        let user_id = Uuid::parse_str(user).map_err(|_| malformed())?;
        let token_id = Uuid::parse_str(token).map_err(|_| malformed())?;

        let key = Self::new(user_id, token_id);
        if key.to_string() != raw {
            return Err(malformed());
        }
        Ok(key)
    }
}

/// 로그용 토큰 지문 (SHA-256 앞 8바이트 16진수)
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key_round_trip() {
        let key = CompositeKey::new(Uuid::new_v4(), Uuid::new_v4());
        let raw = key.to_string();

        assert_eq!(raw.len(), 36 * 2 + 1);
        assert_eq!(raw.parse::<CompositeKey>(), Ok(key));
    }

    #[test]
    fn test_composite_key_layout_is_user_then_token() {
        let user_id = Uuid::parse_str("6f1c8a4e-2b7d-4c1e-9a3f-0d2e5b7c9a11").unwrap();
        let token_id = Uuid::parse_str("0b9e2d6c-8f4a-4e3b-a1c7-5d6e7f8a9b0c").unwrap();

        assert_eq!(
            CompositeKey::new(user_id, token_id).to_string(),
            "6f1c8a4e-2b7d-4c1e-9a3f-0d2e5b7c9a11:0b9e2d6c-8f4a-4e3b-a1c7-5d6e7f8a9b0c"
        );
        assert_eq!(
            CompositeKey::user_pattern(user_id),
            "6f1c8a4e-2b7d-4c1e-9a3f-0d2e5b7c9a11:*"
        );
        assert_eq!(
            CompositeKey::token_pattern(token_id),
            "*:0b9e2d6c-8f4a-4e3b-a1c7-5d6e7f8a9b0c"
        );
    }

    #[test]
    fn test_composite_key_rejects_malformed_input() {
        let valid = Uuid::new_v4().to_string();
        let cases = [
            String::new(),
            valid.clone(),
            format!("{}:", valid),
            format!(":{}", valid),
            format!("{}:not-a-uuid", valid),
            format!("{}:{}:{}", valid, valid, valid),
            format!("{}:{}", valid, Uuid::new_v4().simple()),
            format!("{}:{}", valid.to_uppercase(), valid),
        ];

        for raw in cases {
            assert!(
                raw.parse::<CompositeKey>().is_err(),
                "expected rejection for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_token_key_uses_user_and_token_id() {
        let token = Token {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            refresh_token: "opaque".to_string(),
        };
        let key = token.key();
        assert_eq!(key.user_id, token.user_id);
        assert_eq!(key.token_id, token.id);
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint("header.payload.signature");
        assert_eq!(a.len(), 16);
        assert_eq!(a, fingerprint("header.payload.signature"));
        assert_ne!(a, fingerprint("header.payload.other"));
    }
}
