//! 포켓 링크 인증 서비스 백엔드
//!
//! 링크 저장 서비스의 계정과 세션을 담당합니다.
//! HS256 액세스/리프레시 토큰을 발급하고, 리프레시 세션을 Redis에 `userID:tokenID` 키로 보관합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 로컬 계정 가입, 로그인, 프로필 조회
//! - **JWT 인증**: 액세스 토큰 기반 상태 없는 요청 인증
//! - **세션 관리**: 리프레시 토큰 저장, 단일 사용 갱신, 로그아웃 시 폐기
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: 리프레시 세션 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 쿠키
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← UserService, SessionService, TokenIssuer
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore, RefreshStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use pocket_link_auth::core::AppContext;
//!
//! let ctx = AppContext::assemble(&env, &jwt, session_config, user_store, redis)?;
//! let pair = ctx.sessions.issue_session(user.id).await?;
//! let claims = ctx.sessions.validate_access(&pair.access_token)?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
