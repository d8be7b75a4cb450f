//! JWT 클레임 구조체와 클라이언트에 전달되는 토큰 쌍
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{User, UserRole};

/// 토큰 용도
///
/// 액세스 토큰을 리프레시 엔드포인트에, 리프레시 토큰을 보호된 API에
/// 사용하는 것을 막기 위해 클레임에 기록됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 사용자 레코드에서 비밀번호 해시와 리프레시 토큰을 제외한 식별 정보만 담습니다.
///
/// - `sub`: 사용자 ID (ObjectId hex)
/// - `jti`: 토큰마다 다른 UUID. 같은 초에 발급된 두 토큰도 서로 다른 문자열이 됩니다.
/// - `iat` / `exp`: Unix timestamp (초)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub token_type: TokenType,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_user(
        user_id: String,
        user: &User,
        token_type: TokenType,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            sub: user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            token_type,
            jti: uuid::Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: expires_at,
        }
    }
}

/// JWT 토큰 쌍 구조체
///
/// OAuth 2.0 토큰 응답 형식을 따릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 항상 `"Bearer"`
    pub token_type: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
