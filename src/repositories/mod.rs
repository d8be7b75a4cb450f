//! # Repositories
//!
//! 데이터 액세스 계층입니다. 서비스는 [`users::UserStore`] trait 에만 의존합니다.

pub mod users;
