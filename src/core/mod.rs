//! # Core Module
//!
//! 애플리케이션 조립을 담당합니다.
//!
//! ## 모듈 구성
//!
//! ### [`context`] - 서비스 그래프
//! - 설정과 백엔드(Redis/MongoDB 또는 인메모리)로부터 서비스를 생성
//! - 생성자 주입만 사용하며 전역 상태가 없음
//! - `web::Data<AppContext>`로 핸들러에 공유
//!
//! ```rust,ignore
//! let ctx = AppContext::assemble(&env, &jwt, session_config, user_store, redis)?;
//! let ctx = web::Data::new(ctx);
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(ctx.clone())
//!         .configure(|cfg| configure_all_routes(cfg, &ctx))
//! })
//! ```

pub mod context;

pub use context::AppContext;
