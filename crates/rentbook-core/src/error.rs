//! Domain errors

use rentbook_shared::EntityId;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    // Also returned when the tenant belongs to someone else.
    #[error("Tenant not found")]
    TenantNotFound,

    #[error("Bill not found")]
    BillNotFound,

    #[error("Bill already exists for this month")]
    BillAlreadyExists { tenant_id: EntityId, month: String },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reports the first offending field (alphabetically, for stable output)
/// using its JSON name.
impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().collect();
        fields.sort();

        let Some(field) = fields.first() else {
            return DomainError::validation("body", "Invalid request");
        };
        let json_field = to_camel_case(field);
        let message = field_errors
            .get(*field)
            .and_then(|errs| errs.first())
            .and_then(|err| err.message.as_ref())
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid value for {}", json_field));

        DomainError::Validation {
            field: json_field,
            message,
        }
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
