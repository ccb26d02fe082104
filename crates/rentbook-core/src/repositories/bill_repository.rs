//! Bill repository trait (port)

use async_trait::async_trait;
use rentbook_shared::EntityId;

use crate::domain::{Bill, BillPatch, NewBill};
use crate::error::DomainError;

/// Storage for bills. The one-bill-per-month rule is enforced by callers.
#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Bill>, DomainError>;
    /// Bills of a tenant, in insertion order.
    async fn list_by_tenant(&self, tenant_id: EntityId) -> Result<Vec<Bill>, DomainError>;
    async fn find_by_tenant_and_month(
        &self,
        tenant_id: EntityId,
        month: &str,
    ) -> Result<Option<Bill>, DomainError>;
    async fn create(&self, tenant_id: EntityId, bill: NewBill) -> Result<Bill, DomainError>;
    async fn update(&self, id: EntityId, patch: BillPatch) -> Result<Bill, DomainError>;
    /// Hard delete.
    async fn delete(&self, id: EntityId) -> Result<(), DomainError>;
}
