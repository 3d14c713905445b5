//! User HTTP Handlers
//!
//! 인증된 사용자 본인의 정보를 다룹니다. 모든 핸들러는 [`AuthMiddleware`]로 보호된
//! `/api/v1/user` 스코프에 등록됩니다.
//!
//! [`AuthMiddleware`]: crate::middlewares::AuthMiddleware

use actix_web::{get, web, HttpResponse};

use crate::core::AppContext;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::AuthenticatedUser;
use crate::errors::AppError;

/// 현재 사용자 프로필 (비밀번호 해시 제외)
///
/// # Endpoint
/// `GET /api/v1/user`
///
/// ```json
/// {
///   "id": "7f1c7c2e-8a0e-4bd4-9b2a-3c1f4c8e9d10",
///   "name": "Alice",
///   "email": "a@example.com",
///   "created_at": "2024-01-01T00:00:00Z"
/// }
/// ```
#[get("")]
pub async fn get_current_user(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = ctx.users.find_by_id(user.user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(profile)))
}
