//! bcrypt 기반 비밀번호 해싱
//!
//! 해싱과 검증은 CPU를 오래 점유하므로 `web::block`으로 블로킹 스레드 풀에서 실행합니다.
//! 워커 스레드는 그동안 다른 요청을 처리할 수 있습니다.

use actix_web::web;
use log::debug;

use crate::errors::{AppError, AppResult, ErrorContext};

/// bcrypt 입력 최대 길이 (바이트)
const BCRYPT_MAX_INPUT: usize = 72;

/// 설정된 cost로 비밀번호를 해싱하고 검증합니다.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// 평문 비밀번호를 솔트가 포함된 bcrypt 해시로 변환합니다.
    ///
    /// 같은 입력이라도 매번 다른 솔트가 사용되므로 결과 문자열이 달라집니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidInput` - 빈 문자열, 72바이트 초과, NUL 문자 포함
    /// * `AppError::InternalError` - 블로킹 작업 실패
    pub async fn hash(&self, secret: &str) -> AppResult<String> {
        check_secret(secret)?;

        let secret = secret.to_owned();
        let cost = self.cost;
        let start = std::time::Instant::now();

        let hashed = web::block(move || bcrypt::hash(secret, cost))
            .await
            .context("해싱 작업 실행 실패")?
            .map_err(|e| AppError::InvalidInput(format!("비밀번호 해싱 실패: {}", e)))?;

        debug!("Password hashing took: {:?}", start.elapsed());
        Ok(hashed)
    }

    /// 평문 비밀번호가 저장된 해시와 일치하는지 확인합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidInput` - 입력 형식 오류 또는 손상된 해시
    pub async fn verify(&self, secret: &str, hashed: &str) -> AppResult<bool> {
        check_secret(secret)?;

        let secret = secret.to_owned();
        let hashed = hashed.to_owned();
        let start = std::time::Instant::now();

        let matches = web::block(move || bcrypt::verify(secret, &hashed))
            .await
            .context("검증 작업 실행 실패")?
            .map_err(|e| AppError::InvalidInput(format!("저장된 해시 형식 오류: {}", e)))?;

        debug!("Password verification took: {:?}", start.elapsed());
        Ok(matches)
    }
}

fn check_secret(secret: &str) -> AppResult<()> {
    if secret.is_empty() {
        return Err(AppError::InvalidInput("비밀번호가 비어 있습니다".to_string()));
    }
    if secret.len() > BCRYPT_MAX_INPUT {
        return Err(AppError::InvalidInput(format!(
            "비밀번호는 {}바이트를 넘을 수 없습니다",
            BCRYPT_MAX_INPUT
        )));
    }
    if secret.contains('\0') {
        return Err(AppError::InvalidInput("비밀번호에 NUL 문자를 포함할 수 없습니다".to_string()));
    }
    Ok(())
}
