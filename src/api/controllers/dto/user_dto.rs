use crate::data::models::user::{UpdateProfile, UpdateUser, User, UserKind};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    #[validate(length(min = 1, max = 20))]
    pub document: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub state_registration: Option<String>,
    #[serde(default)]
    pub administrator: bool,
    #[serde(default)]
    pub guest: bool,
}

/// Same fields as creation; leaving `password` out keeps the current one.
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[serde(rename = "type")]
    pub kind: UserKind,
    #[validate(length(min = 1, max = 20))]
    pub document: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub state_registration: Option<String>,
    #[serde(default)]
    pub administrator: bool,
    #[serde(default)]
    pub guest: bool,
}

impl From<&UpdateUserRequest> for UpdateUser {
    fn from(request: &UpdateUserRequest) -> Self {
        Self {
            name: request.name.clone(),
            email: request.email.clone(),
            kind: request.kind.as_str().to_string(),
            document: request.document.clone(),
            state_registration: request.state_registration.clone(),
            administrator: request.administrator,
            guest: request.guest,
        }
    }
}

/// Changing the password requires the old one and a matching confirmation.
#[derive(Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "validate_password_change"))]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    pub old_password: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

fn validate_password_change(request: &ProfileRequest) -> Result<(), ValidationError> {
    let Some(password) = &request.password else {
        return Ok(());
    };

    if request.old_password.as_deref().is_none_or(str::is_empty) {
        return Err(ValidationError::new("old_password"));
    }
    if request.confirm_password.as_ref() != Some(password) {
        return Err(ValidationError::new("confirm_password"));
    }

    Ok(())
}

impl From<&ProfileRequest> for UpdateProfile {
    fn from(request: &ProfileRequest) -> Self {
        Self {
            name: request.name.clone(),
            email: request.email.clone(),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDTO {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub document: Option<String>,
    pub state_registration: Option<String>,
    pub administrator: bool,
    pub guest: bool,
}

impl From<User> for UserDTO {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            kind: user.kind,
            document: user.document,
            state_registration: user.state_registration,
            administrator: user.administrator,
            guest: user.guest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(body: serde_json::Value) -> ProfileRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn profile_without_password_change_is_valid() {
        let request = profile(json!({ "name": "Ana", "email": "ana@brewery.local" }));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn password_change_needs_old_password_and_confirmation() {
        let missing_old = profile(json!({
            "name": "Ana", "email": "ana@brewery.local",
            "password": "secret123", "confirm_password": "secret123"
        }));
        assert!(missing_old.validate().is_err());

        let mismatch = profile(json!({
            "name": "Ana", "email": "ana@brewery.local", "old_password": "old-secret",
            "password": "secret123", "confirm_password": "secret124"
        }));
        assert!(mismatch.validate().is_err());

        let ok = profile(json!({
            "name": "Ana", "email": "ana@brewery.local", "old_password": "old-secret",
            "password": "secret123", "confirm_password": "secret123"
        }));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn absent_tax_ids_are_not_serialized() {
        let dto = UserDTO {
            id: 1,
            name: "Ana".into(),
            email: "ana@brewery.local".into(),
            kind: "individual".into(),
            document: None,
            state_registration: None,
            administrator: false,
            guest: false,
        };
        let value = serde_json::to_value(dto).unwrap();
        assert!(value.get("document").is_none());
        assert_eq!(value["type"], "individual");
    }
}
