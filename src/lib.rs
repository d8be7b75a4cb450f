//! 사용자 계정 및 토큰 세션 백엔드
//!
//! 회원가입, 로그인, 토큰 갱신, 프로필 관리, 관리자용 사용자 관리를
//! 제공하는 Actix-web + MongoDB 서비스입니다.
//!
//! # Features
//!
//! - **사용자 관리**: 계정 생성, 프로필/이미지 참조 수정, 비밀번호 변경, 관리자 CRUD
//! - **JWT 세션**: 액세스/리프레시 토큰 발급, 리프레시 토큰 교체, 로그아웃
//! - **역할 기반 접근 제어**: `USER` / `ADMIN`
//! - **MongoDB**: 사용자 데이터 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← SessionService, UserService, TokenService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    UserStore    │ ← MongoDB / 인메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use session_auth_backend::config::AppConfig;
//! use session_auth_backend::core::AppState;
//!
//! let config = AppConfig::from_env()?;
//! let state = AppState::new(store, &config);
//! let login = state.sessions.login("john@example.com", "Secret123").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
