use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::UserRole;
use crate::domain::models::token::TokenClaims;
use crate::errors::AppError;

/// 검증된 액세스 토큰에서 추출된 요청 단위 인증 주체
///
/// 인증 미들웨어가 요청의 extensions 에 넣고, 핸들러는 인자로 받아 사용합니다.
/// 토큰 클레임만으로 구성되며 저장소를 조회하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 요구 역할을 만족하는지 확인 (ADMIN은 모든 역할을 만족)
    pub fn satisfies(&self, required: UserRole) -> bool {
        self.is_admin() || self.role == required
    }
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어를 거치지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}
