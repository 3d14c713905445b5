//! 인증 및 세션 서비스 모듈
//!
//! # Features
//!
//! - HS256 액세스/리프레시 토큰 발급과 검증 ([`TokenIssuer`])
//! - Redis 기반 리프레시 세션 수명주기 ([`SessionService`])
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{SessionService, SystemClock, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(&jwt_config, Arc::new(SystemClock))?;
//! let sessions = SessionService::new(issuer, refresh_store, &jwt_config);
//! let pair = sessions.issue_session(user.id).await?;
//! ```

pub mod session_service;
pub mod token_service;

pub use session_service::SessionService;
pub use token_service::{Clock, SystemClock, TokenError, TokenIssuer};
