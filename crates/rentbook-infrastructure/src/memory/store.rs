// ============================================================================
// Rentbook Infrastructure - In-Memory Record Store
// File: crates/rentbook-infrastructure/src/memory/store.rs
// ============================================================================

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rentbook_core::domain::{Bill, Tenant, User};
use rentbook_shared::{EntityId, IdSequence};

/// Users, tenants and bills held in process memory.
///
/// Each entity type draws ids from its own [`IdSequence`]. Ids are allocated
/// under the collection's write lock, so ascending id order is insertion
/// order and `BTreeMap` iteration returns records in the order they were
/// created.
pub struct MemoryStore {
    pub(crate) users: RwLock<BTreeMap<EntityId, User>>,
    pub(crate) tenants: RwLock<BTreeMap<EntityId, Tenant>>,
    pub(crate) bills: RwLock<BTreeMap<EntityId, Bill>>,
    pub(crate) user_ids: IdSequence,
    pub(crate) tenant_ids: IdSequence,
    pub(crate) bill_ids: IdSequence,
    pub(crate) electricity_unit_rate: i64,
}

impl MemoryStore {
    pub fn new(electricity_unit_rate: i64) -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            tenants: RwLock::new(BTreeMap::new()),
            bills: RwLock::new(BTreeMap::new()),
            user_ids: IdSequence::new(),
            tenant_ids: IdSequence::new(),
            bill_ids: IdSequence::new(),
            electricity_unit_rate,
        }
    }
}
