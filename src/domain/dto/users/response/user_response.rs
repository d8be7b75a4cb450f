use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::users::{User, UserRole};
use crate::domain::models::token::TokenPair;

/// 사용자 공개 뷰
///
/// 클라이언트에게 사용자를 내보내는 유일한 형태입니다.
/// 비밀번호 해시와 리프레시 토큰은 필드 자체가 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn to_utc(value: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            is_active,
            profile_image_url,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            role,
            is_active,
            profile_image_url,
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 로그인 응답 DTO
///
/// ```json
/// {
///   "user": { "id": "...", "name": "...", "email": "...", "role": "USER", ... },
///   "access_token": "...",
///   "refresh_token": "...",
///   "token_type": "Bearer",
///   "expires_in": 900
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}
