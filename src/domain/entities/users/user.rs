//! User Entity Implementation
//!
//! `users` 컬렉션 문서와 1:1로 매핑되는 사용자 엔티티입니다.
//! 비밀번호 해시와 현재 리프레시 토큰을 포함하므로 이 타입 자체는
//! 절대 HTTP 응답으로 직렬화하지 않습니다. 외부로 나갈 때는 항상
//! [`UserResponse`](crate::domain::dto::users::response::UserResponse)로 변환합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 저장 및 JSON 표현은 `"ADMIN"` / `"USER"` 입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }
}

fn default_active() -> bool {
    true
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름
    pub name: String,
    /// 사용자 이메일 (unique, 소문자로 정규화되어 저장)
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    #[serde(default)]
    pub role: UserRole,
    /// 계정 활성화 여부
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// 외부에 호스팅된 프로필 이미지 URL
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// 현재 유효한 리프레시 토큰 (로그아웃 상태면 None)
    ///
    /// 사용자당 하나의 세션만 유지합니다. 새 로그인은 이전 값을 덮어씁니다.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성 (USER 역할, 활성 상태)
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash,
            role: UserRole::User,
            is_active: true,
            profile_image_url: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// 이메일 비교와 저장에 사용하는 정규화 형태
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("Kim".to_string(), "kim@example.com".to_string(), "hash".to_string());

        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);
        assert!(user.refresh_token.is_none());
        assert!(user.id_string().is_none());
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Kim@Example.COM "), "kim@example.com");
    }
}
