//! User domain entity

use rentbook_shared::EntityId;
use serde::Serialize;

/// Account holder (the landlord).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// User before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "username": "alice"}));
    }
}
