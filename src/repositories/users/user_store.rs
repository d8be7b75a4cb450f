//! 자격 증명 저장소 추상화
//!
//! 서비스 계층은 이 trait 객체(`Arc<dyn UserStore>`)에만 의존합니다.
//! 운영 환경은 [`MongoUserRepository`](super::MongoUserRepository),
//! 테스트는 [`InMemoryUserRepository`](super::InMemoryUserRepository)를 주입합니다.

use async_trait::async_trait;

use crate::domain::entities::users::{User, UserChanges};
use crate::errors::AppResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 정규화된 이메일로 조회합니다.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// ObjectId hex 문자열로 조회합니다. 형식이 잘못되면 `ValidationError`.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// ID를 할당해 저장합니다. 이메일이 이미 있으면 `ConflictError`.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 부분 수정 후 최신 상태를 반환합니다. 대상이 없으면 `Ok(None)`.
    async fn update_by_id(&self, id: &str, changes: UserChanges) -> AppResult<Option<User>>;

    /// 삭제되었으면 `true`, 대상이 없었으면 `false`.
    async fn delete_by_id(&self, id: &str) -> AppResult<bool>;

    /// 최근 생성 순으로 전체 사용자를 반환합니다.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// 저장된 토큰이 `current`와 정확히 같을 때만 `next`로 교체합니다.
    ///
    /// 한 문서에 대한 단일 조건부 갱신이므로 같은 토큰으로 동시에 들어온
    /// 두 갱신 요청 중 하나만 성공합니다.
    async fn replace_refresh_token(&self, id: &str, current: &str, next: &str) -> AppResult<bool>;

    /// 리프레시 토큰 슬롯을 덮어씁니다. `None`은 로그아웃 상태를 의미합니다.
    async fn set_refresh_token(&self, id: &str, token: Option<String>) -> AppResult<bool> {
        let updated = self
            .update_by_id(id, UserChanges::refresh_token(token))
            .await?;
        Ok(updated.is_some())
    }
}
