//! Users Entity Module
//!
//! 사용자 도메인의 영속 엔티티와 부분 수정 명세를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, UserChanges};
//!
//! let user = User::new("Kim".to_string(), "kim@example.com".to_string(), hashed_password);
//! let logout = UserChanges::refresh_token(None);
//! ```

pub mod user;
pub mod user_changes;

pub use user::{normalize_email, User, UserRole};
pub use user_changes::UserChanges;
