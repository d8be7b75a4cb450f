//! # Authentication Configuration Module
//!
//! JWT 서명 키와 토큰 수명, 초기 관리자 계정 설정을 관리합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-256-bit-key-generated-securely"
//! export JWT_ACCESS_EXPIRATION_MINUTES="15"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```
//!
//! `JWT_SECRET`이 없으면 서버는 시작되지 않습니다. 기본 서명 키로 대체하지 않습니다.

use std::fmt;

use super::{ConfigError, EnvLookup, Environment, parse_or};

/// 프로덕션에서 요구하는 최소 서명 키 길이 (바이트)
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// 액세스 토큰 최대 수명 (분, 1일)
pub const MAX_ACCESS_EXPIRATION_MINUTES: i64 = 24 * 60;

/// 리프레시 토큰 최대 수명 (일)
pub const MAX_REFRESH_EXPIRATION_DAYS: i64 = 365;

/// JWT 토큰 설정
///
/// 서명 키는 `Debug` 출력에서 가려집니다.
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 서명 키
    pub secret: String,
    /// 액세스 토큰 수명 (분)
    pub access_expiration_minutes: i64,
    /// 리프레시 토큰 수명 (일)
    pub refresh_expiration_days: i64,
}

impl JwtConfig {
    /// 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub(crate) fn load(lookup: EnvLookup<'_>, environment: Environment) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        if environment.is_production() && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::WeakSecret {
                min: MIN_PRODUCTION_SECRET_LEN,
            });
        }

        let access_expiration_minutes = parse_or(lookup, "JWT_ACCESS_EXPIRATION_MINUTES", 15)?;
        let refresh_expiration_days = parse_or(lookup, "JWT_REFRESH_EXPIRATION_DAYS", 7)?;

        if !(1..=MAX_ACCESS_EXPIRATION_MINUTES).contains(&access_expiration_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_ACCESS_EXPIRATION_MINUTES",
                value: access_expiration_minutes.to_string(),
            });
        }
        if !(1..=MAX_REFRESH_EXPIRATION_DAYS).contains(&refresh_expiration_days) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_REFRESH_EXPIRATION_DAYS",
                value: refresh_expiration_days.to_string(),
            });
        }

        Ok(Self {
            secret,
            access_expiration_minutes,
            refresh_expiration_days,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_expiration_minutes", &self.access_expiration_minutes)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .finish()
    }
}

/// 시작 시 보장할 관리자 계정
///
/// `ADMIN_EMAIL`과 `ADMIN_PASSWORD`가 모두 있을 때만 생성됩니다.
#[derive(Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    pub(crate) fn load(lookup: EnvLookup<'_>) -> Option<Self> {
        let email = lookup("ADMIN_EMAIL").filter(|v| !v.trim().is_empty())?;
        let password = lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty())?;
        let name = lookup("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string());

        Some(Self { name, email, password })
    }
}

impl fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeed")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
