//! 인증 및 보안 서비스 모듈
//!
//! 비밀번호 해싱, JWT 발급/검증, 토큰 세션 관리를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (블로킹 스레드 풀에서 실행)
//! - HMAC-SHA256 토큰 서명, 만료 유예 없음
//! - 사용자당 하나의 리프레시 토큰, 갱신 시 교체
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{PasswordHasher, SessionService, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(&config.jwt));
//! let sessions = SessionService::new(store, PasswordHasher::new(config.password.bcrypt_cost), tokens);
//! let login = sessions.login("john@example.com", "Secret123").await?;
//! ```

pub mod password_hasher;
pub mod session_service;
pub mod token_service;

pub use password_hasher::PasswordHasher;
pub use session_service::SessionService;
pub use token_service::TokenService;
