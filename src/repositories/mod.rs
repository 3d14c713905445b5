//! # Repository Layer
//!
//! 저장소 접근 계층입니다. 서비스는 trait 에만 의존하고, 구현체는 `main`에서 조립되어
//! 생성자로 주입됩니다.
//!
//! - [`tokens`] - 리프레시 세션 저장소 (`RefreshStore`, Redis/메모리 키-값 백엔드 위)
//! - [`users`] - 사용자 레코드 저장소 (`UserStore`, MongoDB/메모리)

pub mod tokens;
pub mod users;
