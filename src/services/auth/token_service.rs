//! JWT 토큰 관리 서비스 구현
//!
//! HS256 서명을 사용하는 액세스/리프레시 토큰의 발급과 검증을 담당합니다.
//! 서명 키와 수명은 생성 시점에 [`JwtConfig`]로 한 번만 전달받습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::entities::users::User;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};
use crate::errors::{AppError, AppResult};

/// JWT 토큰 관리 서비스
///
/// 액세스 토큰(기본 15분)과 리프레시 토큰(기본 7일)을 발급합니다.
/// 두 토큰은 `token_type` 클레임으로 구분되며 서로 대신 사용할 수 없습니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_expiration_minutes),
            refresh_ttl: Duration::days(config.refresh_expiration_days),
        }
    }

    /// 액세스 토큰 수명 (초). 응답의 `expires_in` 값입니다.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장되지 않은 사용자(ID 없음) 또는 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = token_service.issue(&user)?;
    /// store.set_refresh_token(&user_id, Some(pair.refresh_token.clone())).await?;
    /// ```
    pub fn issue(&self, user: &User) -> AppResult<TokenPair> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let access_token = self.sign(&user_id, user, TokenType::Access, self.access_ttl)?;
        let refresh_token = self.sign(&user_id, user, TokenType::Refresh, self.refresh_ttl)?;

        Ok(TokenPair::bearer(
            access_token,
            refresh_token,
            self.access_ttl_seconds(),
        ))
    }

    fn sign(
        &self,
        user_id: &str,
        user: &User,
        token_type: TokenType,
        ttl: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalError("토큰 만료 시각 계산 실패".to_string()))?;
        let claims = TokenClaims::for_user(
            user_id.to_string(),
            user,
            token_type,
            now.timestamp(),
            expires_at.timestamp(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 만료 판단에 유예 시간을 두지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExpiredToken` - `exp`가 지난 토큰
    /// * `AppError::InvalidToken` - 서명 불일치, 형식 오류, 다른 용도의 토큰
    pub fn verify(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::InvalidToken(format!("토큰 검증 실패: {}", e)),
            })?;

        if claims.token_type != expected {
            return Err(AppError::InvalidToken(format!(
                "{:?} 토큰이 필요합니다",
                expected
            )));
        }

        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// `Authorization: Bearer {token}` 형식만 허용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식 또는 빈 토큰
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}
