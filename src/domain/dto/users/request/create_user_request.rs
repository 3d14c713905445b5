//! 회원가입 요청 DTO
//!
//! 새 계정 생성을 위한 HTTP 요청 데이터와 입력 규칙을 정의합니다.
//!
//! | 필드 | 규칙 |
//! |------|------|
//! | `name` | 3-256자, 영문/숫자/공백만, 대문자 1개 이상 |
//! | `email` | 4-256자, `local@domain.tld` 형식 |
//! | `password` | 8-256자, 영문/숫자만, 대문자와 숫자 각 1개 이상 |

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// `local@domain.tld`, TLD는 영문 2-4자 (대소문자 무시)
pub(crate) static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").unwrap()
});

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 256, message = "이름은 3-256자 사이여야 합니다"))]
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(length(min = 4, max = 256, message = "이메일은 4-256자 사이여야 합니다"))]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    #[validate(regex(path = *EMAIL_SHAPE, message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, max = 256, message = "비밀번호는 8-256자 사이여야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if !name.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err(ValidationError::new("invalid_name")
            .with_message("이름은 문자, 숫자, 공백만 사용할 수 있습니다".into()));
    }
    if !name.chars().any(|c| c.is_uppercase()) {
        return Err(ValidationError::new("invalid_name")
            .with_message("이름에는 대문자가 하나 이상 포함되어야 합니다".into()));
    }
    Ok(())
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 영문자와 숫자만 사용할 수 있습니다".into()));
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자와 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}
