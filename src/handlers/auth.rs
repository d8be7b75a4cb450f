//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 토큰 갱신, 로그아웃 엔드포인트입니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/register` - 계정 생성
//! - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인, 토큰 쌍 발급
//! - `POST /api/v1/auth/refresh` - 리프레시 토큰 교체
//! - `POST /api/v1/auth/logout` - 저장된 리프레시 토큰 폐기 (Bearer 필요)
//!
//! 로그인 실패는 이메일이 없는 경우와 비밀번호가 틀린 경우를 구분하지 않고
//! 같은 401 응답을 돌려줍니다. 갱신 실패도 원인과 관계없이 401입니다.
use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::AppState;
use crate::domain::dto::tokens::RefreshTokenRequest;
use crate::domain::dto::users::request::{CreateUserRequest, LoginRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/register`
///
/// # Responses
/// - `201` 생성된 사용자 (공개 뷰)
/// - `400` 입력 검증 실패
/// - `409` 이메일 중복
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let created = state.users.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = state
        .sessions
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            // 계정 존재 여부를 노출하지 않음
            AppError::NotFound(_) => {
                log::warn!("로그인 실패 (미등록 이메일): {}", payload.email);
                AppError::InvalidCredentials
            }
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신 핸들러
///
/// 성공하면 새 토큰 쌍을 반환하고, 제시된 리프레시 토큰은 더 이상 쓸 수 없습니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = state
        .sessions
        .refresh(&payload.refresh_token)
        .await
        .map_err(|e| match e {
            AppError::NotFound(msg) => AppError::InvalidToken(msg),
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/logout`
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.sessions.logout(&user.user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
