//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use corduroy_core::{Email, Role, Sex, UserId};

/// A shop account.
///
/// The password hash is deliberately not a field here; repositories return
/// it separately when credential verification needs it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    /// Account role, `BUYER` on signup.
    pub role: Role,
    pub sex: Sex,
    /// Free-form birthday string, empty until the profile is filled in.
    pub birthday: String,
    pub country: String,
    pub city: String,
    pub avatar: String,
    pub show_age: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last", used as the default order recipient.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "5550100".to_string(),
            role: Role::Buyer,
            sex: Sex::Unknown,
            birthday: String::new(),
            country: String::new(),
            city: String::new(),
            avatar: String::new(),
            show_age: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_user().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_serialized_shape_is_camel_case_without_password() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("showAge").is_some());
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
