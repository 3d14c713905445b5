//! # Domain Entities Module
//!
//! 사용자 저장소에 영속되는 엔티티입니다.

pub mod users;

pub use users::user::User;
