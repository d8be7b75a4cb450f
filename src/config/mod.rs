//! # Configuration Module
//!
//! 백엔드 서비스의 설정을 하나의 [`AppConfig`] 구조체로 모읍니다.
//! 환경 변수는 프로세스 시작 시 [`AppConfig::from_env`]에서 한 번만 읽히며,
//! 요청 처리 중에는 어떤 코드도 환경 변수를 직접 조회하지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, 해싱, Rate Limiting, CORS 설정
//! - [`auth_config`] - JWT, 초기 관리자 계정 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! let tokens = TokenService::new(&config.jwt);
//! let hasher = PasswordHasher::new(config.password.bcrypt_cost);
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 필수
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 선택
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="user_accounts"
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use std::str::FromStr;
use thiserror::Error;

/// 설정 로딩 실패
///
/// 어떤 변형이든 서버 시작을 중단시킵니다.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("environment variable {key} has an invalid value: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("JWT_SECRET must be at least {min} bytes in production")]
    WeakSecret { min: usize },
}

/// 환경 변수 조회 함수
///
/// 테스트에서는 `HashMap` 기반 조회 함수를 넘겨 프로세스 환경을 건드리지 않습니다.
pub(crate) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn read_or(lookup: EnvLookup<'_>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_or<T: FromStr>(
    lookup: EnvLookup<'_>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub admin_seed: Option<AdminSeed>,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingVar` - `JWT_SECRET` 누락
    /// * `ConfigError::InvalidValue` - 숫자 설정값 파싱 실패 또는 허용 범위 밖의 토큰 수명
    /// * `ConfigError::WeakSecret` - 프로덕션에서 짧은 서명 키
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let environment = Environment::load(lookup);

        Ok(Self {
            environment,
            server: ServerConfig::load(lookup)?,
            database: DatabaseConfig::load(lookup),
            jwt: JwtConfig::load(lookup, environment)?,
            password: PasswordConfig::load(lookup, environment),
            rate_limit: RateLimitConfig::load(lookup)?,
            cors: CorsConfig::load(lookup),
            admin_seed: AdminSeed::load(lookup),
        })
    }

    /// 테스트용 설정: 인메모리 저장소와 함께 쓰며 bcrypt cost는 최소값입니다.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            environment: Environment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: 1,
            },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                name: "user_accounts_test".to_string(),
            },
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
                access_expiration_minutes: 15,
                refresh_expiration_days: 7,
            },
            password: PasswordConfig { bcrypt_cost: 4 },
            rate_limit: RateLimitConfig {
                per_second: 100,
                burst_size: 200,
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            admin_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_builds_full_config() {
        let map: HashMap<&str, &str> = HashMap::from([
            ("ENVIRONMENT", "staging"),
            ("JWT_SECRET", "staging-secret"),
            ("PORT", "9000"),
            ("DATABASE_NAME", "accounts"),
        ]);
        let lookup = |key: &str| map.get(key).map(|v| v.to_string());

        let config = AppConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.name, "accounts");
        assert_eq!(config.password.bcrypt_cost, 10);
        assert!(config.admin_seed.is_none());
    }

    #[test]
    fn test_from_lookup_fails_without_secret() {
        let lookup = |_: &str| -> Option<String> { None };
        assert!(matches!(
            AppConfig::from_lookup(&lookup),
            Err(ConfigError::MissingVar("JWT_SECRET"))
        ));
    }
}
