//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <token>` 헤더의 액세스 토큰 검증
//! - 실패 시 핸들러 호출 없이 401 응답
//! - 성공 시 [`AuthenticatedUser`](crate::domain::AuthenticatedUser)를 request extension에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1/user")
//!             .wrap(AuthMiddleware::new(ctx.sessions.clone()))
//!             .service(get_current_user)
//!     )
//!     .service(
//!         web::scope("/api/v1/auth")
//!             .service(sign_in)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
