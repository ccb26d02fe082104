//! User repository trait (port)

use async_trait::async_trait;
use rentbook_shared::EntityId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    /// Fails with `UsernameTaken` if the name is already registered.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}
