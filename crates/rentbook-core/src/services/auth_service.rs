// ============================================================================
// Rentbook Core - Authentication Service
// File: crates/rentbook-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service: registration, credential checks, user lookup

use std::sync::Arc;

use rentbook_security::PasswordService;
use rentbook_shared::EntityId;
use tracing::{info, warn};

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for handling register/login flows
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    passwords: PasswordService,
    // Verified against when the username is unknown so both failure paths
    // cost one Argon2 run.
    decoy_hash: String,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, passwords: PasswordService) -> Result<Self, DomainError> {
        let decoy_hash = passwords
            .hash("rentbook-decoy-password")
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        Ok(Self {
            user_repo,
            passwords,
            decoy_hash,
        })
    }

    /// Register a new user. Usernames are compared exactly (case-sensitive).
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        info!("Registration attempt for username: {}", username);

        // 1. Fast-path uniqueness check (the store enforces it again atomically)
        if self.user_repo.find_by_username(username).await?.is_some() {
            warn!("Registration failed: username already exists: {}", username);
            return Err(DomainError::UsernameTaken(username.to_string()));
        }

        // 2. Hash password off the async workers
        let password_hash = self.hash_password(password).await?;

        // 3. Save
        let user = self
            .user_repo
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!("Registration successful for: {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Check credentials. Unknown user and wrong password are the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self.user_repo.find_by_username(username).await?;

        let stored_hash = match &user {
            Some(u) => u.password_hash.clone(),
            None => self.decoy_hash.clone(),
        };
        let password_valid = self.verify_password(password, stored_hash).await?;

        match user {
            Some(user) if password_valid => {
                info!("Login successful for: {}", username);
                Ok(user)
            }
            _ => {
                warn!("Login failed for: {}", username);
                Err(DomainError::InvalidCredentials)
            }
        }
    }

    pub async fn get_user(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        self.user_repo.find_by_id(id).await
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let passwords = self.passwords.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| DomainError::InternalError(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))
    }

    async fn verify_password(&self, password: &str, hash: String) -> Result<bool, DomainError> {
        let passwords = self.passwords.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::InternalError(format!("verify task failed: {}", e)))
    }
}
