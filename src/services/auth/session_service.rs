//! # 토큰 세션 서비스
//!
//! 로그인, 토큰 갱신, 로그아웃을 조율합니다.
//!
//! ## 세션 모델
//!
//! 사용자 문서의 `refresh_token` 필드 하나가 유일한 세션 슬롯입니다.
//!
//! ```text
//! login   ─▶ 비밀번호 검증 ─▶ 토큰 쌍 발급 ─▶ 슬롯 덮어쓰기
//! refresh ─▶ 서명/만료 검증 ─▶ 슬롯과 비교 ─▶ 새 쌍 발급 ─▶ 조건부 교체
//! logout  ─▶ 슬롯 비우기
//! ```
//!
//! 같은 사용자의 동시 로그인은 마지막 쓰기가 이깁니다. 갱신은 저장된 값이
//! 제시된 토큰과 같을 때만 교체하므로 같은 토큰으로는 한 번만 성공합니다.

use std::sync::Arc;

use log::{info, warn};

use super::password_hasher::PasswordHasher;
use super::token_service::TokenService;
use crate::domain::dto::users::response::{LoginResponse, UserResponse};
use crate::domain::entities::users::normalize_email;
use crate::domain::models::token::{TokenPair, TokenType};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;

pub struct SessionService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl SessionService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 성공하면 새 리프레시 토큰이 사용자 문서에 저장되고 이전 토큰은 무효가 됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 등록되지 않은 이메일
    /// * `AppError::InvalidCredentials` - 비밀번호 불일치 또는 bcrypt가 받을 수 없는 입력 (저장소 변경 없음)
    /// * `AppError::AuthorizationError` - 비활성화된 계정
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let email = normalize_email(email);

        let Some(user) = self.store.find_by_email(&email).await? else {
            // 미등록 이메일도 비밀번호 검증과 같은 bcrypt 비용을 소비합니다.
            let _ = self.hasher.hash(password).await;
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        };

        let matches = match self.hasher.verify(password, &user.password_hash).await {
            Ok(matches) => matches,
            Err(AppError::InvalidInput(reason)) => {
                warn!("로그인 실패 (검증 불가 입력): {} ({})", email, reason);
                false
            }
            Err(e) => return Err(e),
        };

        if !matches {
            warn!("로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            warn!("비활성 계정 로그인 시도: {}", email);
            return Err(AppError::AuthorizationError("비활성화된 계정입니다".to_string()));
        }

        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let tokens = self.tokens.issue(&user)?;

        let stored = self
            .store
            .set_refresh_token(&user_id, Some(tokens.refresh_token.clone()))
            .await?;
        if !stored {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        info!("로그인 성공: {}", user_id);

        Ok(LoginResponse {
            user: UserResponse::from(user),
            tokens,
        })
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
    ///
    /// 제시된 토큰이 서명 검증을 통과하고 저장된 값과 정확히 같아야 합니다.
    /// 성공하면 저장된 값이 새 리프레시 토큰으로 교체됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 서명/형식 오류, 만료, 저장값 불일치, 동시 갱신 경합 패배
    /// * `AppError::NotFound` - 토큰의 사용자가 더 이상 존재하지 않음
    /// * `AppError::AuthorizationError` - 비활성화된 계정
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .tokens
            .verify(refresh_token, TokenType::Refresh)
            .map_err(|e| match e {
                AppError::ExpiredToken => {
                    AppError::InvalidToken("만료된 리프레시 토큰입니다".to_string())
                }
                other => other,
            })?;

        let user = match self.store.find_by_id(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
            }
            Err(AppError::ValidationError(_)) => {
                return Err(AppError::InvalidToken("잘못된 subject 클레임".to_string()));
            }
            Err(e) => return Err(e),
        };

        if user.refresh_token.as_deref() != Some(refresh_token) {
            warn!("저장된 값과 다른 리프레시 토큰 사용: {}", claims.sub);
            return Err(AppError::InvalidToken(
                "저장된 리프레시 토큰과 일치하지 않습니다".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::AuthorizationError("비활성화된 계정입니다".to_string()));
        }

        let tokens = self.tokens.issue(&user)?;

        let rotated = self
            .store
            .replace_refresh_token(&claims.sub, refresh_token, &tokens.refresh_token)
            .await?;
        if !rotated {
            warn!("리프레시 토큰 교체 경합: {}", claims.sub);
            return Err(AppError::InvalidToken(
                "이미 사용된 리프레시 토큰입니다".to_string(),
            ));
        }

        info!("토큰 갱신: {}", claims.sub);
        Ok(tokens)
    }

    /// 저장된 리프레시 토큰을 비웁니다. 여러 번 호출해도 결과는 같습니다.
    pub async fn logout(&self, user_id: &str) -> AppResult<()> {
        self.store.set_refresh_token(user_id, None).await?;
        info!("로그아웃: {}", user_id);
        Ok(())
    }
}
