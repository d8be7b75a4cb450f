//! 애플리케이션 상태 구성

use std::sync::Arc;

use crate::config::AppConfig;
use crate::repositories::users::UserStore;
use crate::services::auth::{PasswordHasher, SessionService, TokenService};
use crate::services::users::UserService;

/// 핸들러와 미들웨어가 `web::Data<AppState>`로 꺼내 쓰는 서비스 묶음
///
/// ```rust,ignore
/// let store: Arc<dyn UserStore> = Arc::new(MongoUserRepository::new(&database));
/// let state = web::Data::new(AppState::new(store, &config));
///
/// HttpServer::new(move || App::new().app_data(state.clone()))
/// ```
pub struct AppState {
    pub sessions: SessionService,
    pub users: UserService,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: &AppConfig) -> Self {
        let hasher = PasswordHasher::new(config.password.bcrypt_cost);
        let tokens = Arc::new(TokenService::new(&config.jwt));

        Self {
            sessions: SessionService::new(store.clone(), hasher, tokens.clone()),
            users: UserService::new(store, hasher),
            tokens,
        }
    }
}
