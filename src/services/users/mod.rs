//! 사용자 관리 서비스 모듈
//!
//! 로컬 계정 가입, 자격 증명 확인, 프로필 조회를 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::{BcryptHasher, UserService};
//!
//! let users = UserService::new(store, Arc::new(BcryptHasher::for_environment(&env)));
//! let user = users.get_by_credentials("a@example.com", "Secret123").await?;
//! ```

pub mod user_service;

pub use user_service::{BcryptHasher, PasswordHasher, UserService};
