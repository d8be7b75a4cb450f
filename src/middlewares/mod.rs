//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 검증된 사용자 정보를 request extension에 저장
//! - 역할 요구 시 권한 검사 (ADMIN은 모든 역할을 만족)
//!
//! 토큰 검증에는 `web::Data<AppState>`의 `TokenService`를 사용하며 저장소는 조회하지 않습니다.
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(state.clone())
//!     .service(
//!         web::scope("/api/v1/users")
//!             .wrap(AuthMiddleware::admin())
//!             .service(list_users)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
