use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::Store;

/// Shared, immutable handles cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        let tokens = TokenService::new(&config.security);
        Self {
            config: Arc::new(config),
            store,
            tokens,
        }
    }
}
