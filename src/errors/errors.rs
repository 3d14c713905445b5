//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! HTTP 경계에서 사용하는 통합 에러 타입입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 각 계층의 에러를
//! 일관된 상태 코드와 JSON 응답으로 변환합니다.
//!
//! ## 응답 정책
//!
//! - 인증 실패(401)는 어떤 검사가 실패했는지 노출하지 않고 항상 같은 본문을 반환합니다.
//!   상세 사유는 로그에만 남깁니다.
//! - 인프라 장애(500)는 내부 메시지를 응답 본문에 담지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find_profile(id: Uuid) -> Result<User, AppError> {
//!     store.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 세션 저장소 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 저장소 상태 이상 (500), 예: 하나의 토큰 ID에 여러 키가 매칭됨
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에게 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg) => msg.clone(),
            AppError::AuthenticationError(_) => "unauthorized".to_string(),
            _ => "internal server error".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 각 에러 타입을 상태 코드와 `{"error": ...}` JSON 본문으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        } else if status == StatusCode::UNAUTHORIZED {
            log::warn!("인증 거부: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> Result<T, AppError>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
