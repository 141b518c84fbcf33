//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use gatekeeper_auth::{AccessGateway, AuthSessionManager, CredentialChain, TokenCodec};
use gatekeeper_core::config::AppConfig;
use gatekeeper_database::{ServiceStore, StoreHealth, UserStore};
use gatekeeper_service::{AdminDirectory, ServiceRegistry};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is
/// immutable after start-up and `Arc`-wrapped, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token validation and access-list enforcement.
    pub gateway: Arc<AccessGateway>,
    /// Register, login, refresh, logout.
    pub sessions: Arc<AuthSessionManager>,
    /// Admin user management.
    pub directory: Arc<AdminDirectory>,
    /// Service catalogue.
    pub registry: Arc<ServiceRegistry>,
    /// Backing store liveness, for `GET /health`.
    pub store_health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Wires the auth and service layers over the given stores.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        services: Arc<dyn ServiceStore>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        let codec = Arc::new(TokenCodec::from_config(&config.auth));
        let gateway = AccessGateway::new(
            Arc::clone(&codec),
            Arc::clone(&users),
            CredentialChain::standard(&config.auth.cookie_name),
        );
        let sessions = AuthSessionManager::new(codec, Arc::clone(&users), config.auth.clone());
        let directory = AdminDirectory::new(Arc::clone(&users), Arc::clone(&services), &config.auth);
        let registry = ServiceRegistry::new(users, services);

        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            sessions: Arc::new(sessions),
            directory: Arc::new(directory),
            registry: Arc::new(registry),
            store_health,
        }
    }
}
