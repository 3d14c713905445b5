//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성자에서 협력자(저장소, 해셔, 시계)를 주입받으며,
//! `main`에서 한 번 조립되어 [`AppContext`](crate::core::AppContext)로 공유됩니다.
//!
//! # Features
//!
//! - 사용자 가입과 자격 증명 확인
//! - JWT 토큰 발급/검증과 리프레시 세션 관리

pub mod auth;
pub mod users;
