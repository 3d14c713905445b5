//! # User Data Transfer Objects Module
//!
//! - `request` - 회원가입, 로그인, 토큰 갱신 요청
//! - `response` - 사용자 프로필 응답

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
