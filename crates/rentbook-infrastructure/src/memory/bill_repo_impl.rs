// ============================================================================
// Rentbook Infrastructure - In-Memory Bill Repository
// File: crates/rentbook-infrastructure/src/memory/bill_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use rentbook_core::domain::{Bill, BillPatch, NewBill};
use rentbook_core::error::DomainError;
use rentbook_core::repositories::BillRepository;
use rentbook_shared::EntityId;
use tracing::debug;

use super::MemoryStore;

#[async_trait]
impl BillRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Bill>, DomainError> {
        Ok(self.bills.read().get(&id).cloned())
    }

    async fn list_by_tenant(&self, tenant_id: EntityId) -> Result<Vec<Bill>, DomainError> {
        Ok(self
            .bills
            .read()
            .values()
            .filter(|b| b.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find_by_tenant_and_month(
        &self,
        tenant_id: EntityId,
        month: &str,
    ) -> Result<Option<Bill>, DomainError> {
        Ok(self
            .bills
            .read()
            .values()
            .find(|b| b.tenant_id == tenant_id && b.month == month)
            .cloned())
    }

    async fn create(&self, tenant_id: EntityId, bill: NewBill) -> Result<Bill, DomainError> {
        let mut bills = self.bills.write();
        let created = Bill::new(
            self.bill_ids.next_id(),
            tenant_id,
            bill,
            self.electricity_unit_rate,
        );
        bills.insert(created.id, created.clone());
        debug!("Stored bill {} for tenant {}", created.id, tenant_id);
        Ok(created)
    }

    async fn update(&self, id: EntityId, patch: BillPatch) -> Result<Bill, DomainError> {
        let mut bills = self.bills.write();
        let bill = bills.get_mut(&id).ok_or(DomainError::BillNotFound)?;
        bill.apply(patch, self.electricity_unit_rate);
        Ok(bill.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<(), DomainError> {
        self.bills
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::BillNotFound)
    }
}
