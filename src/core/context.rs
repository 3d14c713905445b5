//! # Application Context
//!
//! 시작 시 한 번 조립되는 서비스 그래프입니다. 모든 협력자는 생성자로 주입되며
//! 핸들러는 `web::Data<AppContext>`로 접근합니다.
//!
//! ```text
//! KeyValueBackend ─▶ TokenRepository ─┐
//! JwtConfig + Clock ─▶ TokenIssuer ───┴─▶ SessionService ─┐
//! UserStore + PasswordHasher ─────────────▶ UserService ──┴─▶ AppContext
//! ```

use std::sync::Arc;

use crate::caching::KeyValueBackend;
use crate::config::{Environment, JwtConfig, SessionConfig};
use crate::errors::AppError;
use crate::repositories::tokens::TokenRepository;
use crate::repositories::users::UserStore;
use crate::services::auth::{Clock, SessionService, SystemClock, TokenIssuer};
use crate::services::users::{BcryptHasher, UserService};

pub struct AppContext {
    pub users: Arc<UserService>,
    pub sessions: Arc<SessionService>,
    pub session_config: SessionConfig,
}

impl AppContext {
    pub fn new(
        users: Arc<UserService>,
        sessions: Arc<SessionService>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            session_config,
        }
    }

    /// 설정과 저장소 백엔드로 전체 서비스 그래프를 만듭니다.
    pub fn assemble(
        env: &Environment,
        jwt: &JwtConfig,
        session_config: SessionConfig,
        user_store: Arc<dyn UserStore>,
        session_backend: Arc<dyn KeyValueBackend>,
    ) -> Result<Self, AppError> {
        Self::assemble_with_clock(
            env,
            jwt,
            session_config,
            user_store,
            session_backend,
            Arc::new(SystemClock),
        )
    }

    pub fn assemble_with_clock(
        env: &Environment,
        jwt: &JwtConfig,
        session_config: SessionConfig,
        user_store: Arc<dyn UserStore>,
        session_backend: Arc<dyn KeyValueBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let issuer = TokenIssuer::new(jwt, clock)?;
        let refresh_store = Arc::new(TokenRepository::new(session_backend));
        let sessions = Arc::new(SessionService::new(issuer, refresh_store, jwt));

        let hasher = Arc::new(BcryptHasher::for_environment(env));
        let users = Arc::new(UserService::new(user_store, hasher));

        Ok(Self::new(users, sessions, session_config))
    }
}
