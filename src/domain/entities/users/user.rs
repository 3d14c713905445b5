//! User Entity Implementation
//!
//! 로컬 계정(이메일/패스워드) 사용자 엔티티입니다.
//! 식별자는 UUID 이며 토큰의 `sub` 클레임과 같은 값을 사용합니다.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// 소문자로 정규화된 이메일
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 새 로컬 사용자를 생성합니다. 이메일은 소문자로 정규화됩니다.
    pub fn new_local(name: String, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email: normalize_email(email),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
