//! # Domain Models Module
//!
//! 영속 엔티티가 아닌 도메인 값 객체들입니다.
//!
//! ## 모듈 구성
//!
//! - [`token`] - JWT 클레임, 토큰 쌍, 리프레시 세션 레코드([`token::Token`])와
//!   `"<userUUID>:<tokenUUID>"` 복합 키 코덱([`token::CompositeKey`])
//! - [`auth`] - 인증 미들웨어가 요청에 바인딩하는 [`auth::AuthenticatedUser`]
//!
//! ## 세션 식별 방식
//!
//! 리프레시 세션은 사용자와 토큰 ID 의 조합으로 식별합니다.
//! 한 사용자가 여러 기기에서 동시에 로그인할 수 있고, 각 세션을 개별로 폐기할 수 있습니다.
//!
//! ```rust,ignore
//! use crate::domain::models::token::{CompositeKey, Token};
//!
//! let token = Token { id: claims.jti, user_id: claims.sub, refresh_token };
//! let key: CompositeKey = token.key();
//! assert_eq!(key.to_string(), format!("{}:{}", claims.sub, claims.jti));
//! ```

pub mod auth;
pub mod token;
