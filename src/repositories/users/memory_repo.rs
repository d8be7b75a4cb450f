//! 프로세스 내 사용자 저장소
//!
//! MongoDB 없이 서비스와 HTTP 계층을 테스트하기 위한 [`UserStore`] 구현입니다.
//! 모든 연산은 하나의 `RwLock` 아래에서 수행되므로 조건부 갱신도 원자적입니다.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use super::user_repo::parse_object_id;
use super::user_store::UserStore;
use crate::domain::entities::users::{User, UserChanges};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, HashMap<ObjectId, User>>> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, HashMap<ObjectId, User>>> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }
}

fn email_taken(users: &HashMap<ObjectId, User>, email: &str, except: Option<ObjectId>) -> bool {
    users
        .iter()
        .any(|(id, user)| user.email == email && Some(*id) != except)
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.read()?.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;
        Ok(self.read()?.get(&object_id).cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.write()?;

        if email_taken(&users, &user.email, None) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update_by_id(&self, id: &str, changes: UserChanges) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;
        let mut users = self.write()?;

        if let Some(email) = &changes.email {
            if email_taken(&users, email, Some(object_id)) {
                return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
            }
        }

        Ok(users.get_mut(&object_id).map(|user| {
            changes.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        Ok(self.write()?.remove(&object_id).is_some())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn replace_refresh_token(&self, id: &str, current: &str, next: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let mut users = self.write()?;

        match users.get_mut(&object_id) {
            Some(user) if user.refresh_token.as_deref() == Some(current) => {
                user.refresh_token = Some(next.to_string());
                user.updated_at = DateTime::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> User {
        User::new("Han".to_string(), email.to_string(), "hash".to_string())
    }

    #[actix_web::test]
    async fn test_create_assigns_id_and_finds_by_email() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("han@example.com")).await.unwrap();

        let found = repo.find_by_email("han@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(created.id.is_some());
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("dup@example.com")).await.unwrap();

        let result = repo.create(new_user("dup@example.com")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_update_email_to_taken_address_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();
        let b = repo.create(new_user("b@example.com")).await.unwrap();

        let changes = UserChanges {
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };
        let result = repo.update_by_id(&b.id_string().unwrap(), changes).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .update_by_id(&ObjectId::new().to_hex(), UserChanges::refresh_token(None))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn test_set_refresh_token_default_method() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("t@example.com")).await.unwrap();
        let id = user.id_string().unwrap();

        assert!(repo.set_refresh_token(&id, Some("r1".to_string())).await.unwrap());
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("r1"));

        assert!(repo.set_refresh_token(&id, None).await.unwrap());
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[actix_web::test]
    async fn test_replace_refresh_token_requires_exact_match() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("cas@example.com")).await.unwrap();
        let id = user.id_string().unwrap();
        repo.set_refresh_token(&id, Some("r1".to_string())).await.unwrap();

        assert!(!repo.replace_refresh_token(&id, "r0", "r2").await.unwrap());
        assert!(repo.replace_refresh_token(&id, "r1", "r2").await.unwrap());
        assert!(!repo.replace_refresh_token(&id, "r1", "r3").await.unwrap());

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("r2"));
    }

    #[actix_web::test]
    async fn test_delete_and_list() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create(new_user("a@example.com")).await.unwrap();
        repo.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
        assert!(repo.delete_by_id(&a.id_string().unwrap()).await.unwrap());
        assert!(!repo.delete_by_id(&a.id_string().unwrap()).await.unwrap());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
