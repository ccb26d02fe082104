//! Repository traits (ports)

pub mod user_repository;
pub mod tenant_repository;
pub mod bill_repository;

pub use user_repository::UserRepository;
pub use tenant_repository::TenantRepository;
pub use bill_repository::BillRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
