use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, event::EventRepositoryImpl, health::HealthCheckRepositoryImpl,
    member::MemberRepositoryImpl,
};
use kernel::repository::{
    auth::AuthRepository, event::EventRepository, health::HealthCheckRepository,
    member::MemberRepository,
};
use shared::config::{AppConfig, AuthConfig};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    event_repository: Arc<dyn EventRepository>,
    member_repository: Arc<dyn MemberRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    auth_config: AuthConfig,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: &AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let member_repository: Arc<dyn MemberRepository> =
            Arc::new(MemberRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            member_repository.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        Self::from_parts(
            health_check_repository,
            event_repository,
            member_repository,
            auth_repository,
            app_config.auth.clone(),
        )
    }

    // 実装を差し替えて組み立てる（テストではインメモリ実装を渡す）
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        event_repository: Arc<dyn EventRepository>,
        member_repository: Arc<dyn MemberRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            health_check_repository,
            event_repository,
            member_repository,
            auth_repository,
            auth_config,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn member_repository(&self) -> Arc<dyn MemberRepository> {
        self.member_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth_config
    }
}
