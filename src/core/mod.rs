//! # Core Module
//!
//! 요청 처리 전반에서 공유되는 애플리케이션 상태를 정의합니다.
//!
//! 서비스 인스턴스는 `main`에서 [`AppConfig`](crate::config::AppConfig)로 한 번 생성되어
//! `web::Data<AppState>`로 모든 워커에 공유됩니다. 요청 처리 중에는 환경 변수를 읽지 않습니다.

pub mod state;

pub use state::AppState;
