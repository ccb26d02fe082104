// ============================================================================
// Rentbook Infrastructure - In-Memory Tenant Repository
// File: crates/rentbook-infrastructure/src/memory/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use rentbook_core::domain::{NewTenant, Tenant, TenantPatch};
use rentbook_core::error::DomainError;
use rentbook_core::repositories::TenantRepository;
use rentbook_shared::EntityId;
use tracing::debug;

use super::MemoryStore;

#[async_trait]
impl TenantRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.read().get(&id).cloned())
    }

    async fn list_active_by_user(&self, user_id: EntityId) -> Result<Vec<Tenant>, DomainError> {
        Ok(self
            .tenants
            .read()
            .values()
            .filter(|t| t.user_id == user_id && t.active)
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: EntityId, tenant: NewTenant) -> Result<Tenant, DomainError> {
        let mut tenants = self.tenants.write();
        let created = Tenant {
            id: self.tenant_ids.next_id(),
            user_id,
            name: tenant.name,
            mobile: tenant.mobile,
            rent_amount: tenant.rent_amount,
            active: true,
        };
        tenants.insert(created.id, created.clone());
        debug!("Stored tenant {} for user {}", created.id, user_id);
        Ok(created)
    }

    async fn update(&self, id: EntityId, patch: TenantPatch) -> Result<Tenant, DomainError> {
        let mut tenants = self.tenants.write();
        let tenant = tenants.get_mut(&id).ok_or(DomainError::TenantNotFound)?;
        tenant.apply(patch);
        Ok(tenant.clone())
    }

    async fn deactivate(&self, id: EntityId) -> Result<(), DomainError> {
        let mut tenants = self.tenants.write();
        let tenant = tenants.get_mut(&id).ok_or(DomainError::TenantNotFound)?;
        tenant.deactivate();
        Ok(())
    }
}
