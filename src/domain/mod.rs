//! # Domain Layer Module
//!
//! 인증 서비스의 도메인 계층입니다. 저장소나 HTTP 에 의존하지 않는 타입만 둡니다.
//!
//! ```text
//! domain/
//! ├── entities/  - 영속 엔티티 (User)
//! ├── dto/       - HTTP 요청/응답 계약과 입력 검증 규칙
//! └── models/    - 토큰 클레임, 리프레시 세션 레코드, 복합 키 코덱, 인증 주체
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::User;
pub use models::auth::AuthenticatedUser;
pub use models::token::{Claims, CompositeKey, Token, TokenKind, TokenPair};
