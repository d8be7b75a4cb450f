//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 설정을 받아 한 번 생성되고 `AppState`를 통해 공유됩니다.
//! 저장소는 `Arc<dyn UserStore>`로 주입됩니다.
//!
//! # Features
//!
//! - 사용자 생명주기 관리 (등록, 조회, 수정, 삭제)
//! - JWT 액세스/리프레시 토큰 세션
//! - 역할 기반 관리자 기능

pub mod auth;
pub mod users;
