//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 입력 검증과 응답 형식만 책임지고, 판단은 서비스에 맡깁니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   AuthMiddleware - Bearer 토큰 검증           ← 보호된 스코프만
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                          ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   UserService / SessionService                ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   UserStore / RefreshStore                    ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! 상태 코드 매핑은 `AppError`의 `ResponseError` 구현이 담당합니다.
//!
//! ```rust,ignore
//! #[post("/sign-in")]
//! pub async fn sign_in(
//!     ctx: web::Data<AppContext>,
//!     payload: web::Json<SignInRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod users;
