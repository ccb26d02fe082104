// ============================================================================
// Rentbook Infrastructure - In-Memory User Repository
// File: crates/rentbook-infrastructure/src/memory/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use rentbook_core::domain::{NewUser, User};
use rentbook_core::error::DomainError;
use rentbook_core::repositories::UserRepository;
use rentbook_shared::EntityId;
use tracing::debug;

use super::MemoryStore;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameTaken(user.username));
        }

        let created = User {
            id: self.user_ids.next_id(),
            username: user.username,
            password_hash: user.password_hash,
        };
        users.insert(created.id, created.clone());
        debug!("Stored user {}", created.id);
        Ok(created)
    }
}
