/*
 * Responsibility
 * - Users の request/response DTO
 * - validate() は失敗したフィールドのメッセージを全て集めて返す
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration payload.
///
/// Fields default to empty so a missing field surfaces as a 400 with a
/// per-field message instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push("A first name is required.".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("A last name is required.".to_string());
        }
        if self.email_address.trim().is_empty() {
            errors.push("An email address is required.".to_string());
        } else if !valid_email(&self.email_address) {
            errors.push("The email address you entered is not valid.".to_string());
        }
        if self.password.is_empty() {
            errors.push("A password is required.".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// Format check only: one '@', non-empty local part, dotted domain.
// Deliverability is not this API's problem.
fn valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: "joe@smith.com".to_string(),
            password: "joepassword".to_string(),
        }
    }

    #[test]
    fn accepts_complete_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn collects_all_missing_fields() {
        let errors = CreateUserRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_malformed_email() {
        let mut req = valid_request();
        req.email_address = "not-an-email".to_string();

        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors,
            vec!["The email address you entered is not valid.".to_string()]
        );
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let mut req = valid_request();
        req.first_name = "   ".to_string();
        assert!(req.validate().is_err());
    }
}
