//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생명주기를 관리하는 비즈니스 로직을 구현합니다.
//!
//! ## 서비스 구성
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       UserService                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  ┌───────────────┐  ┌───────────────┐  ┌─────────────┐  │
//! │  │ Registration  │  │  Self-service │  │    Admin    │  │
//! │  │ • Email norm  │  │ • Profile     │  │ • List/Get  │  │
//! │  │ • Hash        │  │ • Image URL   │  │ • Role/Act  │  │
//! │  │ • Create      │  │ • Password    │  │ • Delete    │  │
//! │  └───────────────┘  └───────────────┘  └─────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                  Arc<dyn UserStore> (Mongo / InMemory)
//! ```
//!
//! ## 보안 규칙
//!
//! - 모든 반환값은 [`UserResponse`]로 변환되어 비밀번호 해시와 리프레시 토큰이 제거됩니다.
//! - 이메일은 저장 전에 소문자로 정규화됩니다.
//! - 비밀번호 변경과 관리자에 의한 비활성화는 저장된 리프레시 토큰을 비웁니다.

use std::sync::Arc;

use log::info;

use crate::config::AdminSeed;
use crate::domain::dto::users::request::{
    AdminUpdateUserRequest, ChangePasswordRequest, CreateUserRequest, UpdateProfileImageRequest,
    UpdateProfileRequest,
};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::{normalize_email, User, UserChanges, UserRole};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::auth::PasswordHasher;

fn not_found() -> AppError {
    AppError::NotFound("사용자를 찾을 수 없습니다".to_string())
}

/// 사용자 관리 비즈니스 로직 서비스
///
/// ## 에러 처리 전략
///
/// - **ValidationError**: 잘못된 ID 형식
/// - **ConflictError**: 이메일 중복
/// - **InvalidCredentials**: 비밀번호 변경 시 현재 비밀번호 불일치
/// - **NotFound**: 대상 사용자 없음
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// 새 사용자 계정 생성
    ///
    /// 생성된 계정은 `USER` 역할의 활성 상태이며 세션이 없습니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(UserResponse)` - 생성된 사용자 정보
    /// * `Err(AppError::ConflictError)` - 이메일 중복
    /// * `Err(AppError::InvalidInput)` - 해싱할 수 없는 비밀번호
    pub async fn register(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let start_time = std::time::Instant::now();

        let password_hash = self.hasher.hash(&request.password).await?;
        let user = User::new(
            request.name.trim().to_string(),
            normalize_email(&request.email),
            password_hash,
        );

        let created = self.store.create(user).await?;

        info!(
            "사용자 등록: {} ({:?})",
            created.email,
            start_time.elapsed()
        );
        Ok(UserResponse::from(created))
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserResponse> {
        self.get_user(user_id).await
    }

    /// 본인 이름/이메일 수정
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        let changes = UserChanges {
            name: request.name.map(|name| name.trim().to_string()),
            email: request.email.as_deref().map(normalize_email),
            ..Default::default()
        };

        self.apply(user_id, changes).await
    }

    /// 프로필 이미지 참조 변경
    ///
    /// 이미지는 이미 외부에 호스팅되어 있고 URL만 저장합니다.
    pub async fn update_profile_image(
        &self,
        user_id: &str,
        request: UpdateProfileImageRequest,
    ) -> AppResult<UserResponse> {
        let changes = UserChanges {
            profile_image_url: Some(request.profile_image_url),
            ..Default::default()
        };

        self.apply(user_id, changes).await
    }

    /// 비밀번호 변경
    ///
    /// 현재 비밀번호를 확인한 뒤 새 해시를 저장하고 리프레시 토큰을 비웁니다.
    /// 이미 발급된 액세스 토큰은 만료 시까지 유효합니다.
    pub async fn change_password(
        &self,
        user_id: &str,
        request: ChangePasswordRequest,
    ) -> AppResult<()> {
        let user = self.store.find_by_id(user_id).await?.ok_or_else(not_found)?;

        if !self
            .hasher
            .verify(&request.current_password, &user.password_hash)
            .await?
        {
            return Err(AppError::InvalidCredentials);
        }

        let password_hash = self.hasher.hash(&request.new_password).await?;
        let changes = UserChanges {
            password_hash: Some(password_hash),
            refresh_token: Some(None),
            ..Default::default()
        };

        self.store
            .update_by_id(user_id, changes)
            .await?
            .ok_or_else(not_found)?;

        info!("비밀번호 변경: {}", user_id);
        Ok(())
    }

    /// 전체 사용자 목록 (최근 가입 순)
    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.store.list_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// ID로 사용자 조회
    ///
    /// # 반환값
    ///
    /// * `Err(AppError::NotFound)` - 해당 ID의 사용자가 존재하지 않음
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    pub async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.store.find_by_id(id).await?.ok_or_else(not_found)?;
        Ok(UserResponse::from(user))
    }

    /// 관리자에 의한 사용자 수정
    ///
    /// `is_active: false`로 바꾸면 해당 사용자의 세션도 함께 끊어집니다.
    pub async fn admin_update_user(
        &self,
        id: &str,
        request: AdminUpdateUserRequest,
    ) -> AppResult<UserResponse> {
        let deactivating = request.is_active == Some(false);

        let changes = UserChanges {
            name: request.name.map(|name| name.trim().to_string()),
            email: request.email.as_deref().map(normalize_email),
            role: request.role,
            is_active: request.is_active,
            refresh_token: deactivating.then_some(None),
            ..Default::default()
        };

        let updated = self.apply(id, changes).await?;
        info!("관리자 사용자 수정: {} (deactivated: {})", id, deactivating);
        Ok(updated)
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(not_found());
        }

        info!("사용자 삭제: {}", id);
        Ok(())
    }

    /// 시작 시 관리자 계정 보장
    ///
    /// 이메일이 없으면 `ADMIN` 역할로 생성하고, 있으면 역할만 승격합니다.
    /// 기존 계정의 비밀번호는 바꾸지 않습니다.
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> AppResult<UserResponse> {
        let email = normalize_email(&seed.email);

        if let Some(existing) = self.store.find_by_email(&email).await? {
            if existing.is_admin() {
                return Ok(UserResponse::from(existing));
            }

            let id = existing
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
            let changes = UserChanges {
                role: Some(UserRole::Admin),
                ..Default::default()
            };
            let promoted = self.apply(&id, changes).await?;

            info!("기존 계정을 관리자로 승격: {}", email);
            return Ok(promoted);
        }

        let password_hash = self.hasher.hash(&seed.password).await?;
        let mut admin = User::new(seed.name.clone(), email, password_hash);
        admin.role = UserRole::Admin;

        let created = self.store.create(admin).await?;
        info!("관리자 계정 생성: {}", created.email);
        Ok(UserResponse::from(created))
    }

    async fn apply(&self, id: &str, changes: UserChanges) -> AppResult<UserResponse> {
        let updated = self
            .store
            .update_by_id(id, changes)
            .await?
            .ok_or_else(not_found)?;
        Ok(UserResponse::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::InMemoryUserRepository;

    fn service() -> (UserService, Arc<InMemoryUserRepository>) {
        let store = Arc::new(InMemoryUserRepository::new());
        (UserService::new(store.clone(), PasswordHasher::new(4)), store)
    }

    fn register_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: " Yoon ".to_string(),
            email: email.to_string(),
            password: "Secret123".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_normalizes_and_hashes() {
        let (users, store) = service();

        let created = users.register(register_request("Yoon@Example.COM")).await.unwrap();

        assert_eq!(created.email, "yoon@example.com");
        assert_eq!(created.name, "Yoon");
        assert_eq!(created.role, UserRole::User);

        let stored = store.find_by_email("yoon@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Secret123");
        assert!(stored.refresh_token.is_none());
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_conflicts_case_insensitively() {
        let (users, _) = service();
        users.register(register_request("dup@example.com")).await.unwrap();

        let result = users.register(register_request("DUP@example.com")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_update_profile_and_image() {
        let (users, _) = service();
        let created = users.register(register_request("me@example.com")).await.unwrap();

        let updated = users
            .update_profile(
                &created.id,
                UpdateProfileRequest {
                    name: Some("New Name".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.email, "me@example.com");

        let with_image = users
            .update_profile_image(
                &created.id,
                UpdateProfileImageRequest {
                    profile_image_url: "https://cdn.example.com/a.png".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            with_image.profile_image_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[actix_web::test]
    async fn test_change_password_requires_current_and_revokes_session() {
        let (users, store) = service();
        let created = users.register(register_request("pw@example.com")).await.unwrap();
        store
            .set_refresh_token(&created.id, Some("live-token".to_string()))
            .await
            .unwrap();

        let wrong = users
            .change_password(
                &created.id,
                ChangePasswordRequest {
                    current_password: "Nope1234".to_string(),
                    new_password: "Another123".to_string(),
                },
            )
            .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        users
            .change_password(
                &created.id,
                ChangePasswordRequest {
                    current_password: "Secret123".to_string(),
                    new_password: "Another123".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
        assert!(PasswordHasher::new(4)
            .verify("Another123", &stored.password_hash)
            .await
            .unwrap());
    }

    #[actix_web::test]
    async fn test_admin_deactivation_clears_refresh_token() {
        let (users, store) = service();
        let created = users.register(register_request("off@example.com")).await.unwrap();
        store
            .set_refresh_token(&created.id, Some("live-token".to_string()))
            .await
            .unwrap();

        let updated = users
            .admin_update_user(
                &created.id,
                AdminUpdateUserRequest {
                    name: None,
                    email: None,
                    role: None,
                    is_active: Some(false),
                },
            )
            .await
            .unwrap();

        assert!(!updated.is_active);
        let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[actix_web::test]
    async fn test_role_change_keeps_session() {
        let (users, store) = service();
        let created = users.register(register_request("role@example.com")).await.unwrap();
        store
            .set_refresh_token(&created.id, Some("live-token".to_string()))
            .await
            .unwrap();

        let updated = users
            .admin_update_user(
                &created.id,
                AdminUpdateUserRequest {
                    name: None,
                    email: None,
                    role: Some(UserRole::Admin),
                    is_active: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, UserRole::Admin);
        let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("live-token"));
    }

    #[actix_web::test]
    async fn test_get_and_delete_missing_user() {
        let (users, _) = service();
        let missing = mongodb::bson::oid::ObjectId::new().to_hex();

        assert!(matches!(users.get_user(&missing).await, Err(AppError::NotFound(_))));
        assert!(matches!(users.delete_user(&missing).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            users.get_user("bad-id").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_list_users_returns_public_views() {
        let (users, _) = service();
        users.register(register_request("one@example.com")).await.unwrap();
        users.register(register_request("two@example.com")).await.unwrap();

        let listed = users.list_users().await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[actix_web::test]
    async fn test_ensure_admin_creates_then_promotes() {
        let (users, store) = service();
        let seed = AdminSeed {
            name: "Root".to_string(),
            email: "Root@Example.com".to_string(),
            password: "RootPass123".to_string(),
        };

        let created = users.ensure_admin(&seed).await.unwrap();
        assert_eq!(created.role, UserRole::Admin);
        assert_eq!(created.email, "root@example.com");

        let again = users.ensure_admin(&seed).await.unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        let plain = users.register(register_request("plain@example.com")).await.unwrap();
        let promoted = users
            .ensure_admin(&AdminSeed {
                name: "Plain".to_string(),
                email: "plain@example.com".to_string(),
                password: "Whatever123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(promoted.id, plain.id);
        assert_eq!(promoted.role, UserRole::Admin);
    }
}
