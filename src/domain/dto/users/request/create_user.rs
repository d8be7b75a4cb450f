//! # 사용자 생성 요청 DTO
//!
//! 회원가입 요청 본문과 비밀번호 강도 검증 함수를 정의합니다.
//!
//! ## 검증 규칙
//!
//! - `name`: 1-50자, 유니코드 허용
//! - `email`: RFC 5322 형식. 중복 여부는 서비스 계층에서 확인
//! - `password`: 8-72자, 대문자/소문자/숫자 각각 1개 이상
//!
//! 72자 상한은 bcrypt 입력 한계와 같습니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 새로운 사용자 계정 생성을 위한 요청 DTO
///
/// ```json
/// {
///   "name": "Kim Minsu",
///   "email": "minsu@example.com",
///   "password": "SecurePass123"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// 표시 이름
    #[validate(length(min = 1, max = 50, message = "이름은 1-50자 사이여야 합니다"))]
    pub name: String,

    /// 로그인 식별자로 사용되는 이메일 주소
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 계정 비밀번호 (해싱 후 저장되므로 평문으로 유지하지 않음)
    #[validate(length(min = 8, max = 72, message = "비밀번호는 8-72자 사이여야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// 비밀번호 보안 강도를 검증하는 함수
///
/// # 필수 요구사항
///
/// - **대문자**: 최소 1개 이상 (A-Z)
/// - **소문자**: 최소 1개 이상 (a-z)
/// - **숫자**: 최소 1개 이상 (0-9)
///
/// # 에러 코드
///
/// - `weak_password`: 대문자, 소문자, 숫자 중 하나 이상이 누락된 경우
pub(crate) fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}
