//! # 사용자 관리 서비스 구현
//!
//! 로컬 계정(이메일/비밀번호)의 가입과 자격 증명 확인을 담당합니다.
//! 세션 발급은 [`SessionService`](crate::services::auth::SessionService)의 몫이며,
//! 이 서비스는 "누구인가"까지만 답합니다.
//!
//! ## 보안
//!
//! - bcrypt 해싱, cost 는 환경별로 [`PasswordConfig`]에서 결정
//! - 존재하지 않는 이메일과 틀린 비밀번호는 같은 401 로 응답

use std::sync::Arc;

use uuid::Uuid;

use crate::config::{Environment, PasswordConfig};
use crate::domain::dto::users::request::CreateUserRequest;
use crate::domain::entities::users::user::User;
use crate::errors::{AppError, ErrorContext};
use crate::repositories::users::UserStore;

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

/// 비밀번호 해시 전략
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AppError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn for_environment(env: &Environment) -> Self {
        Self::new(PasswordConfig::bcrypt_cost(env))
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let start = std::time::Instant::now();
        let hashed = bcrypt::hash(password, self.cost).context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", start.elapsed());
        Ok(hashed)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash).context("비밀번호 검증 실패")
    }
}

pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// 새 로컬 계정을 생성합니다.
    ///
    /// 입력 검증은 호출자(핸들러)가 끝낸 상태여야 합니다.
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 이미 가입된 이메일
    /// * `DatabaseError` / `InternalError` - 저장소 또는 해싱 실패
    pub async fn sign_up(&self, request: CreateUserRequest) -> Result<User, AppError> {
        let CreateUserRequest {
            name,
            email,
            password,
        } = request;

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일입니다".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&password)?;
        let user = User::new_local(name, &email, password_hash);
        self.store.save(&user).await?;

        log::info!("사용자 생성 - ID: {}", user.id);
        Ok(user)
    }

    /// 이메일과 비밀번호로 사용자를 확인합니다.
    pub async fn get_by_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}
