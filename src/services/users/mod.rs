//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 본인 프로필 관리, 관리자용 사용자 관리를 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let users = UserService::new(store, PasswordHasher::new(cost));
//! let created = users.register(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
