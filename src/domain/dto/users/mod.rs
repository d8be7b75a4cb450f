//! # User Data Transfer Objects Module
//!
//! 사용자 관련 API의 요청/응답 데이터 구조를 정의합니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── auth_request.rs     # 로그인
//! │   ├── create_user.rs      # 회원가입, 비밀번호 강도 검증
//! │   └── update_user.rs      # 프로필/이미지/비밀번호/관리자 수정
//! └── response/
//!     └── user_response.rs    # 공개 뷰, 로그인 응답
//! ```

pub mod request;
pub mod response;
