//! 사용자 요청 DTO

pub mod auth_request;
pub mod create_user_request;

pub use auth_request::{RefreshTokenRequest, SignInRequest};
pub use create_user_request::CreateUserRequest;
