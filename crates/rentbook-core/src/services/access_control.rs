// ============================================================================
// Rentbook Core - Access Control
// File: crates/rentbook-core/src/services/access_control.rs
// ============================================================================
//! Ownership-scoped access to tenants and bills
//!
//! Every operation takes the acting [`User`] (resolved from the session by
//! [`AccessControl::resolve_session`]) and verifies that the target record's
//! ownership chain ends at that user before touching the store. A record that
//! belongs to someone else is reported exactly like a missing one.

use std::sync::Arc;

use rentbook_security::SessionStore;
use rentbook_shared::utils::mask_mobile;
use rentbook_shared::EntityId;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{Bill, BillPatch, NewBill, NewTenant, Tenant, TenantPatch, User};
use crate::error::DomainError;
use crate::repositories::{BillRepository, TenantRepository, UserRepository};
use crate::services::AuthService;

pub struct AccessControl {
    auth: Arc<AuthService<dyn UserRepository>>,
    sessions: Arc<SessionStore>,
    tenants: Arc<dyn TenantRepository>,
    bills: Arc<dyn BillRepository>,
    // Serializes check-then-act sequences across concurrent requests.
    write_gate: Mutex<()>,
}

impl AccessControl {
    pub fn new(
        auth: Arc<AuthService<dyn UserRepository>>,
        sessions: Arc<SessionStore>,
        tenants: Arc<dyn TenantRepository>,
        bills: Arc<dyn BillRepository>,
    ) -> Self {
        Self {
            auth,
            sessions,
            tenants,
            bills,
            write_gate: Mutex::new(()),
        }
    }

    /// Session token to user. Missing, unknown and expired tokens are all
    /// `Unauthorized`, as is a token whose user no longer exists.
    pub async fn resolve_session(&self, token: Option<&str>) -> Result<User, DomainError> {
        let token = token.ok_or(DomainError::Unauthorized)?;
        let user_id = self
            .sessions
            .resolve(token)
            .ok_or(DomainError::Unauthorized)?;
        self.auth
            .get_user(user_id)
            .await?
            .ok_or(DomainError::Unauthorized)
    }

    // ------------------------------------------------------------------
    // Tenants
    // ------------------------------------------------------------------

    pub async fn list_tenants(&self, user: &User) -> Result<Vec<Tenant>, DomainError> {
        self.tenants.list_active_by_user(user.id).await
    }

    pub async fn create_tenant(&self, user: &User, input: NewTenant) -> Result<Tenant, DomainError> {
        let tenant = self.tenants.create(user.id, input).await?;
        info!(
            "User {} created tenant {} ({})",
            user.id,
            tenant.id,
            mask_mobile(&tenant.mobile)
        );
        Ok(tenant)
    }

    pub async fn get_tenant(&self, user: &User, tenant_id: EntityId) -> Result<Tenant, DomainError> {
        self.owned_tenant(user, tenant_id).await
    }

    pub async fn update_tenant(
        &self,
        user: &User,
        tenant_id: EntityId,
        patch: TenantPatch,
    ) -> Result<Tenant, DomainError> {
        let _guard = self.write_gate.lock().await;
        self.owned_tenant(user, tenant_id).await?;
        let tenant = self.tenants.update(tenant_id, patch).await?;
        info!("User {} updated tenant {}", user.id, tenant_id);
        Ok(tenant)
    }

    /// Soft delete: the tenant leaves listings but stays resolvable for its bills.
    pub async fn delete_tenant(&self, user: &User, tenant_id: EntityId) -> Result<(), DomainError> {
        let _guard = self.write_gate.lock().await;
        self.owned_tenant(user, tenant_id).await?;
        self.tenants.deactivate(tenant_id).await?;
        info!("User {} deactivated tenant {}", user.id, tenant_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Bills
    // ------------------------------------------------------------------

    pub async fn list_bills(&self, user: &User, tenant_id: EntityId) -> Result<Vec<Bill>, DomainError> {
        self.owned_tenant(user, tenant_id).await?;
        self.bills.list_by_tenant(tenant_id).await
    }

    /// One bill per tenant per month; a second one is a conflict.
    pub async fn create_bill(
        &self,
        user: &User,
        tenant_id: EntityId,
        input: NewBill,
    ) -> Result<Bill, DomainError> {
        let _guard = self.write_gate.lock().await;
        self.owned_tenant(user, tenant_id).await?;

        if self
            .bills
            .find_by_tenant_and_month(tenant_id, &input.month)
            .await?
            .is_some()
        {
            warn!("Tenant {} already billed for {}", tenant_id, input.month);
            return Err(DomainError::BillAlreadyExists {
                tenant_id,
                month: input.month,
            });
        }

        let bill = self.bills.create(tenant_id, input).await?;
        info!("User {} created bill {} for tenant {} ({})", user.id, bill.id, tenant_id, bill.month);
        Ok(bill)
    }

    pub async fn get_bill(&self, user: &User, bill_id: EntityId) -> Result<Bill, DomainError> {
        self.owned_bill(user, bill_id).await
    }

    pub async fn update_bill(
        &self,
        user: &User,
        bill_id: EntityId,
        patch: BillPatch,
    ) -> Result<Bill, DomainError> {
        let _guard = self.write_gate.lock().await;
        self.owned_bill(user, bill_id).await?;
        let bill = self.bills.update(bill_id, patch).await?;
        info!("User {} updated bill {}", user.id, bill_id);
        Ok(bill)
    }

    pub async fn delete_bill(&self, user: &User, bill_id: EntityId) -> Result<(), DomainError> {
        let _guard = self.write_gate.lock().await;
        self.owned_bill(user, bill_id).await?;
        self.bills.delete(bill_id).await?;
        info!("User {} deleted bill {}", user.id, bill_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ownership resolution
    // ------------------------------------------------------------------

    async fn owned_tenant(&self, user: &User, tenant_id: EntityId) -> Result<Tenant, DomainError> {
        match self.tenants.find_by_id(tenant_id).await? {
            Some(tenant) if tenant.is_owned_by(user.id) => Ok(tenant),
            Some(_) => {
                warn!("User {} denied access to tenant {}", user.id, tenant_id);
                Err(DomainError::TenantNotFound)
            }
            None => {
                debug!("Tenant {} does not exist", tenant_id);
                Err(DomainError::TenantNotFound)
            }
        }
    }

    /// Bill → tenant → owner. Any broken link is `BillNotFound`.
    async fn owned_bill(&self, user: &User, bill_id: EntityId) -> Result<Bill, DomainError> {
        let bill = self
            .bills
            .find_by_id(bill_id)
            .await?
            .ok_or(DomainError::BillNotFound)?;

        match self.tenants.find_by_id(bill.tenant_id).await? {
            Some(tenant) if tenant.is_owned_by(user.id) => Ok(bill),
            Some(_) => {
                warn!("User {} denied access to bill {}", user.id, bill_id);
                Err(DomainError::BillNotFound)
            }
            None => {
                warn!("Bill {} points at missing tenant {}", bill_id, bill.tenant_id);
                Err(DomainError::BillNotFound)
            }
        }
    }
}
