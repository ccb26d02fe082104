use std::sync::Arc;

use rentbook_core::repositories::{BillRepository, TenantRepository, UserRepository};
use rentbook_core::services::{AccessControl, AuthService};
use rentbook_core::DomainError;
use rentbook_security::{PasswordService, SessionConfig, SessionStore};
use rentbook_shared::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub access: Arc<AccessControl>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire services over the given store. Called once per process.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        bills: Arc<dyn BillRepository>,
    ) -> Result<Self, DomainError> {
        let passwords = PasswordService::new(&config.security)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;
        let auth = Arc::new(AuthService::new(users, passwords)?);
        let sessions = Arc::new(SessionStore::new(SessionConfig::from(&config.session)));
        let access = Arc::new(AccessControl::new(
            auth.clone(),
            sessions.clone(),
            tenants,
            bills,
        ));

        Ok(Self {
            auth,
            access,
            sessions,
            config: Arc::new(config),
        })
    }
}
