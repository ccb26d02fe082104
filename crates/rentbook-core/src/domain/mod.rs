//! # Rentbook Core - Domain Module
//! 
//! Domain entities for the rentbook service.

pub mod user;
pub mod tenant;
pub mod bill;

pub use user::{NewUser, User};
pub use tenant::{NewTenant, Tenant, TenantPatch};
pub use bill::{Bill, BillPatch, NewBill};
