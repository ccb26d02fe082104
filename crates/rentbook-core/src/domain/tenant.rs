//! Tenant domain entity

use std::borrow::Cow;

use rentbook_shared::utils::is_valid_mobile;
use rentbook_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Someone renting from a user. `user_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    pub mobile: String,
    pub rent_amount: i64,
    pub active: bool,
}

impl Tenant {
    pub fn is_owned_by(&self, user_id: EntityId) -> bool {
        self.user_id == user_id
    }

    /// Merge a partial update; absent fields keep their value.
    pub fn apply(&mut self, patch: TenantPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(mobile) = patch.mobile {
            self.mobile = mobile;
        }
        if let Some(rent_amount) = patch.rent_amount {
            self.rent_amount = rent_amount;
        }
    }

    /// Soft delete. The record stays resolvable by id.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTenant {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,

    #[validate(range(min = 0, message = "Rent amount must not be negative"))]
    pub rent_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TenantPatch {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_mobile"))]
    pub mobile: Option<String>,

    #[validate(range(min = 0, message = "Rent amount must not be negative"))]
    pub rent_amount: Option<i64>,
}

/// Non-blank, at most 100 characters. Stored exactly as given.
fn validate_name(name: &str) -> Result<(), ValidationError> {
    if !name.trim().is_empty() && name.chars().count() <= 100 {
        return Ok(());
    }
    Err(ValidationError::new("name").with_message(Cow::Borrowed(
        "Name must be between 1 and 100 characters and not blank",
    )))
}

fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if is_valid_mobile(mobile) {
        return Ok(());
    }
    Err(ValidationError::new("mobile").with_message(Cow::Borrowed(
        "Mobile number must start with 91 followed by 10 digits",
    )))
}
