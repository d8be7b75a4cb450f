//! # 사용자 관련 요청 DTO 모듈

pub mod auth_request;
pub mod create_user;
pub mod update_user;

pub use auth_request::LoginRequest;
pub use create_user::CreateUserRequest;
pub use update_user::{
    AdminUpdateUserRequest, ChangePasswordRequest, UpdateProfileImageRequest, UpdateProfileRequest,
};
