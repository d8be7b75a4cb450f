//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - 인증, 역할 검사                  ← Web Layer
//!   Handlers (이 모듈) - 검증, 응답 변환
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                       ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   UserStore - 데이터 접근                        ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 핸들러 규칙
//!
//! - 서비스는 `web::Data<AppState>`로 받습니다.
//! - 요청 본문은 `validator`로 먼저 검증합니다. 실패 시 400.
//! - 인증된 사용자는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) 인자로 받습니다.
//! - 모든 에러는 `AppError`로 반환되어 `{"error", "message"}` JSON으로 변환됩니다.
//!
//! ```rust,ignore
//! #[get("/{user_id}")]
//! pub async fn get_user(
//!     state: web::Data<AppState>,
//!     user_id: web::Path<String>,
//! ) -> Result<HttpResponse, AppError> {
//!     let user = state.users.get_user(&user_id).await?;
//!     Ok(HttpResponse::Ok().json(user))
//! }
//! ```

pub mod auth;
pub mod users;
