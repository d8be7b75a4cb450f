//! 사용자 정보 수정 요청 DTO
//!
//! 본인 프로필 수정, 프로필 이미지 참조 변경, 비밀번호 변경, 관리자 수정 요청을 정의합니다.
//! 모든 부분 수정 요청은 최소 한 개의 필드를 포함해야 합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::create_user::validate_password_strength;
use crate::domain::entities::users::UserRole;

/// `PATCH /api/v1/me`
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_profile_not_empty"))]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "이름은 1-50자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
}

fn validate_profile_not_empty(req: &UpdateProfileRequest) -> Result<(), ValidationError> {
    if req.name.is_none() && req.email.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("수정할 항목이 없습니다".into()));
    }
    Ok(())
}

/// `PUT /api/v1/me/profile-image`
///
/// 이미지는 외부 호스팅 서비스에 이미 업로드된 상태이며, 여기서는 URL만 저장합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileImageRequest {
    #[validate(url(message = "유효한 이미지 URL을 입력해주세요"))]
    #[validate(length(max = 2048, message = "URL이 너무 깁니다"))]
    pub profile_image_url: String,
}

/// `PUT /api/v1/me/password`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 72, message = "현재 비밀번호를 입력해주세요"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "비밀번호는 8-72자 사이여야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
}

/// `PATCH /api/v1/users/{id}` (관리자 전용)
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_admin_update_not_empty"))]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "이름은 1-50자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,
}

fn validate_admin_update_not_empty(req: &AdminUpdateUserRequest) -> Result<(), ValidationError> {
    if req.name.is_none() && req.email.is_none() && req.role.is_none() && req.is_active.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("수정할 항목이 없습니다".into()));
    }
    Ok(())
}
