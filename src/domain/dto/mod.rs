//! # Data Transfer Objects
//!
//! HTTP 요청 본문은 `validator`로 검증한 뒤 서비스 계층으로 전달되고,
//! 응답은 엔티티를 공개 뷰로 변환한 형태만 사용합니다.

pub mod tokens;
pub mod users;
