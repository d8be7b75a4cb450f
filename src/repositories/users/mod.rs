//! 사용자 저장소 모듈

pub mod user_store;
pub mod user_repo;
pub mod memory_repo;

pub use memory_repo::InMemoryUserRepository;
pub use user_repo::MongoUserRepository;
pub use user_store::UserStore;
