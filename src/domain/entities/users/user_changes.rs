//! 사용자 부분 수정 명세
//!
//! 저장소 구현마다 같은 의미로 적용되도록 `$set` 문서 대신 타입으로 변경 사항을 표현합니다.

use mongodb::bson::{doc, Bson, DateTime, Document};

use super::user::{User, UserRole};

/// `None` 필드는 변경하지 않습니다.
///
/// `refresh_token`은 두 단계 Option입니다. `Some(None)`은 저장된 토큰을 비웁니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub profile_image_url: Option<String>,
    pub refresh_token: Option<Option<String>>,
}

impl UserChanges {
    pub fn refresh_token(token: Option<String>) -> Self {
        Self {
            refresh_token: Some(token),
            ..Default::default()
        }
    }

    /// 인메모리 저장소용: 엔티티에 직접 반영하고 `updated_at`을 갱신합니다.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(url) = &self.profile_image_url {
            user.profile_image_url = Some(url.clone());
        }
        if let Some(token) = &self.refresh_token {
            user.refresh_token = token.clone();
        }
        user.updated_at = DateTime::now();
    }

    /// MongoDB용: `$set`에 들어갈 문서를 만듭니다. `updated_at`은 항상 포함됩니다.
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! { "updated_at": DateTime::now() };

        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }
        if let Some(password_hash) = &self.password_hash {
            set.insert("password_hash", password_hash.as_str());
        }
        if let Some(role) = self.role {
            set.insert("role", role.as_str());
        }
        if let Some(is_active) = self.is_active {
            set.insert("is_active", is_active);
        }
        if let Some(url) = &self.profile_image_url {
            set.insert("profile_image_url", url.as_str());
        }
        if let Some(token) = &self.refresh_token {
            let value = match token {
                Some(token) => Bson::String(token.clone()),
                None => Bson::Null,
            };
            set.insert("refresh_token", value);
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new("Park".to_string(), "park@example.com".to_string(), "hash".to_string());
        user.refresh_token = Some("old-token".to_string());
        user
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut user = sample_user();
        let changes = UserChanges {
            name: Some("Park Jiwoo".to_string()),
            ..Default::default()
        };

        changes.apply_to(&mut user);

        assert_eq!(user.name, "Park Jiwoo");
        assert_eq!(user.email, "park@example.com");
        assert_eq!(user.refresh_token.as_deref(), Some("old-token"));
    }

    #[test]
    fn test_clear_refresh_token() {
        let mut user = sample_user();
        UserChanges::refresh_token(None).apply_to(&mut user);

        assert!(user.refresh_token.is_none());
    }

    #[test]
    fn test_set_document_writes_null_for_cleared_token() {
        let set = UserChanges::refresh_token(None).to_set_document();

        assert_eq!(set.get("refresh_token"), Some(&Bson::Null));
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("name"));
    }

    #[test]
    fn test_set_document_role_uses_wire_name() {
        let changes = UserChanges {
            role: Some(UserRole::Admin),
            is_active: Some(false),
            ..Default::default()
        };
        let set = changes.to_set_document();

        assert_eq!(set.get_str("role").unwrap(), "ADMIN");
        assert!(!set.get_bool("is_active").unwrap());
    }
}
