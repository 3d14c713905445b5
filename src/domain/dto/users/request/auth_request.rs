//! 로그인 및 토큰 갱신 요청 DTO

use serde::Deserialize;
use validator::Validate;

use super::create_user_request::EMAIL_SHAPE;

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, max = 256, message = "이메일을 입력해주세요"))]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    #[validate(regex(path = *EMAIL_SHAPE, message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, max = 256, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 쿠키를 쓸 수 없는 클라이언트를 위한 본문 전달 방식
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_in(email: &str) -> SignInRequest {
        SignInRequest {
            email: email.to_string(),
            password: "Secret123".to_string(),
        }
    }

    #[test]
    fn test_sign_in_email_must_be_well_formed() {
        assert!(sign_in("a@example.com").validate().is_ok());
        assert!(sign_in("x").validate().is_err());
        assert!(sign_in("a@b").validate().is_err());
        assert!(sign_in("").validate().is_err());
    }

    #[test]
    fn test_refresh_token_required() {
        let empty = RefreshTokenRequest {
            refresh_token: String::new(),
        };
        assert!(empty.validate().is_err());
    }
}
