//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값을 시작 시 한 번 읽어 타입이 있는 구조체로 고정합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, 패스워드 해싱 설정
//! - [`auth_config`] - JWT 서명 키와 수명, 리프레시 쿠키, 로그아웃 범위 설정
//!
//! ## 환경 분리
//!
//! `ENVIRONMENT` 값에 따라 기본값이 달라집니다. 프로덕션에서는 서명 키 누락 시
//! 시작이 실패하고, 리프레시 쿠키의 `Secure` 속성이 기본으로 켜집니다.
//!
//! ```bash
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
