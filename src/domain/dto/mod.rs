//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 데이터 구조입니다.
//! 요청 DTO는 `validator` derive 로 입력 규칙을 선언하고, 핸들러가 `validate()`를 호출합니다.
//! 응답 DTO는 비밀번호 해시 같은 내부 필드를 포함하지 않습니다.

pub mod users;

pub use users::*;
