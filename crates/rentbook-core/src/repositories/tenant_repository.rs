//! Tenant repository trait (port)

use async_trait::async_trait;
use rentbook_shared::EntityId;

use crate::domain::{NewTenant, Tenant, TenantPatch};
use crate::error::DomainError;

/// Storage for tenants. No ownership checks happen at this level.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Resolves inactive tenants too.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Tenant>, DomainError>;
    /// Active tenants of `user_id`, in insertion order.
    async fn list_active_by_user(&self, user_id: EntityId) -> Result<Vec<Tenant>, DomainError>;
    async fn create(&self, user_id: EntityId, tenant: NewTenant) -> Result<Tenant, DomainError>;
    async fn update(&self, id: EntityId, patch: TenantPatch) -> Result<Tenant, DomainError>;
    /// Soft delete.
    async fn deactivate(&self, id: EntityId) -> Result<(), DomainError>;
}
