//! Bill domain entity

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rentbook_shared::utils::is_valid_month;
use rentbook_shared::EntityId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One month of rent and electricity for a tenant. At most one per (tenant, month).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: EntityId,
    pub tenant_id: EntityId,
    pub month: String,
    pub rent_paid: bool,
    pub electricity_reading: Option<i64>,
    pub electricity_amount: Option<i64>,
    pub electricity_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(id: EntityId, tenant_id: EntityId, input: NewBill, unit_rate: i64) -> Self {
        Self {
            id,
            tenant_id,
            month: input.month,
            rent_paid: false,
            electricity_reading: input.electricity_reading,
            electricity_amount: electricity_charge(input.electricity_reading, unit_rate),
            electricity_paid: false,
            created_at: Utc::now(),
        }
    }

    /// Merge payment flags and a corrected reading. Tenant, month and
    /// creation time never change.
    pub fn apply(&mut self, patch: BillPatch, unit_rate: i64) {
        if let Some(rent_paid) = patch.rent_paid {
            self.rent_paid = rent_paid;
        }
        if let Some(electricity_paid) = patch.electricity_paid {
            self.electricity_paid = electricity_paid;
        }
        if let Some(reading) = patch.electricity_reading {
            self.electricity_reading = Some(reading);
            self.electricity_amount = electricity_charge(Some(reading), unit_rate);
        }
    }
}

pub fn electricity_charge(reading: Option<i64>, unit_rate: i64) -> Option<i64> {
    reading.map(|units| units.saturating_mul(unit_rate))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    #[validate(custom(function = "validate_month"))]
    pub month: String,

    #[validate(range(min = 0, message = "Electricity reading must not be negative"))]
    pub electricity_reading: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillPatch {
    pub rent_paid: Option<bool>,
    pub electricity_paid: Option<bool>,

    #[validate(range(min = 0, message = "Electricity reading must not be negative"))]
    pub electricity_reading: Option<i64>,
}

fn validate_month(month: &str) -> Result<(), ValidationError> {
    if is_valid_month(month) {
        return Ok(());
    }
    Err(ValidationError::new("month")
        .with_message(Cow::Borrowed("Month must be in YYYY-MM format")))
}
