//! # Domain Models Module
//!
//! 영속되지 않는 값 객체를 정의합니다.
//!
//! - [`token`] - JWT 클레임, 토큰 쌍, 토큰 용도
//! - [`auth`] - 요청 단위 인증 주체 (`AuthenticatedUser`)

pub mod auth;
pub mod token;
