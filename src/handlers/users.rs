//! User Management HTTP Handlers
//!
//! 본인 계정(`/api/v1/me`)과 관리자용 사용자 관리(`/api/v1/users`) 엔드포인트입니다.
//! 인증과 역할 검사는 라우트 스코프의 [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가
//! 담당하고, 핸들러는 검증된 [`AuthenticatedUser`]만 받습니다.
//!
//! # Self-service (Bearer 필요)
//!
//! - `GET /api/v1/me`
//! - `PATCH /api/v1/me`
//! - `PUT /api/v1/me/profile-image`
//! - `PUT /api/v1/me/password`
//!
//! # Admin (ADMIN 역할 필요)
//!
//! - `GET /api/v1/users`
//! - `GET /api/v1/users/{user_id}`
//! - `PATCH /api/v1/users/{user_id}`
//! - `DELETE /api/v1/users/{user_id}`
use actix_web::{delete, get, patch, put, web, HttpResponse};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::users::request::{
    AdminUpdateUserRequest, ChangePasswordRequest, UpdateProfileImageRequest, UpdateProfileRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

/// 현재 사용자 정보 조회
///
/// 토큰 발급 이후 삭제된 계정이면 404를 반환합니다.
#[get("")]
pub async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.users.get_profile(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 본인 이름/이메일 수정
#[patch("")]
pub async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = state
        .users
        .update_profile(&user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// 프로필 이미지 참조 변경
///
/// 이미지 파일은 받지 않습니다. 외부에 호스팅된 이미지의 URL만 저장합니다.
#[put("/profile-image")]
pub async fn update_profile_image(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileImageRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = state
        .users
        .update_profile_image(&user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// 비밀번호 변경. 성공하면 기존 리프레시 토큰은 폐기됩니다.
#[put("/password")]
pub async fn change_password(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state
        .users
        .change_password(&user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("")]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.get_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// 관리자에 의한 사용자 수정 (이름, 이메일, 역할, 활성 상태)
#[patch("/{user_id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<AdminUpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = state
        .users
        .admin_update_user(&user_id, payload.into_inner())
        .await?;

    log::info!("관리자 {} 가 사용자 {} 수정", admin.user_id, user_id);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.users.delete_user(&user_id).await?;

    log::info!("관리자 {} 가 사용자 {} 삭제", admin.user_id, user_id);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::{web, App};
    use serde_json::{json, Value};

    use crate::core::state::test_support::in_memory_state;
    use crate::core::AppState;
    use crate::domain::entities::users::{User, UserRole};
    use crate::repositories::users::{InMemoryUserRepository, UserStore};
    use crate::routes::configure_all_routes;

    macro_rules! app {
        ($state:expr) => {
            init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    /// 저장소에 직접 사용자를 넣고 (id, 액세스 토큰)을 돌려줍니다.
    async fn seeded(
        state: &web::Data<AppState>,
        store: &InMemoryUserRepository,
        email: &str,
        role: UserRole,
    ) -> (String, String) {
        let mut user = User::new("Seed".to_string(), email.to_string(), "unused".to_string());
        user.role = role;
        let user = store.create(user).await.unwrap();
        let token = state.tokens.issue(&user).unwrap().access_token;
        (user.id_string().unwrap(), format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_me_requires_token_and_returns_profile() {
        let (state, store) = in_memory_state();
        let (_, bearer) = seeded(&state, &store, "me@example.com", UserRole::User).await;
        let app = app!(state);

        let req = TestRequest::get().uri("/api/v1/me").to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(("Authorization", bearer))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = read_body_json(res).await;
        assert_eq!(body["email"], "me@example.com");
        assert!(body.get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_update_me_and_profile_image() {
        let (state, store) = in_memory_state();
        let (_, bearer) = seeded(&state, &store, "edit@example.com", UserRole::User).await;
        let app = app!(state);

        let req = TestRequest::patch()
            .uri("/api/v1/me")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(json!({ "name": "Edited" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["name"], "Edited");

        let req = TestRequest::patch()
            .uri("/api/v1/me")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(json!({}))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::put()
            .uri("/api/v1/me/profile-image")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(json!({ "profile_image_url": "https://cdn.example.com/p.png" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["profile_image_url"], "https://cdn.example.com/p.png");

        let req = TestRequest::put()
            .uri("/api/v1/me/profile-image")
            .insert_header(("Authorization", bearer))
            .set_json(json!({ "profile_image_url": "not a url" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_non_admin_cannot_list_users() {
        let (state, store) = in_memory_state();
        let (_, bearer) = seeded(&state, &store, "plain@example.com", UserRole::User).await;
        let app = app!(state);

        let req = TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(("Authorization", bearer))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let body: Value = read_body_json(res).await;
        assert_eq!(body["error"], "insufficient_permissions");
    }

    #[actix_web::test]
    async fn test_admin_manages_users() {
        let (state, store) = in_memory_state();
        let (_, admin) = seeded(&state, &store, "admin@example.com", UserRole::Admin).await;
        let (target_id, _) = seeded(&state, &store, "target@example.com", UserRole::User).await;
        store
            .set_refresh_token(&target_id, Some("live".to_string()))
            .await
            .unwrap();
        let app = app!(state);

        let req = TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let req = TestRequest::patch()
            .uri(&format!("/api/v1/users/{}", target_id))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "is_active": false }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["is_active"], false);
        let stored = store.find_by_id(&target_id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());

        let req = TestRequest::get()
            .uri("/api/v1/users/not-an-id")
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = TestRequest::delete()
            .uri(&format!("/api/v1/users/{}", target_id))
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = TestRequest::get()
            .uri(&format!("/api/v1/users/{}", target_id))
            .insert_header(("Authorization", admin))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_change_password_revokes_refresh_token() {
        let (state, store) = in_memory_state();
        let app = app!(state);

        let req = TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "name": "Pw", "email": "pw@example.com", "password": "Secret123" }))
            .to_request();
        call_service(&app, req).await;

        let req = TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "pw@example.com", "password": "Secret123" }))
            .to_request();
        let login: Value = read_body_json(call_service(&app, req).await).await;
        let bearer = format!("Bearer {}", login["access_token"].as_str().unwrap());

        let req = TestRequest::put()
            .uri("/api/v1/me/password")
            .insert_header(("Authorization", bearer))
            .set_json(json!({ "current_password": "Secret123", "new_password": "Changed123" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let stored = store.find_by_email("pw@example.com").await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());

        let req = TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .set_json(json!({ "refresh_token": login["refresh_token"] }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
