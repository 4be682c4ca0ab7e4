use crate::model::ROLES;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@farm.test")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    #[schema(example = "Jane Wanjiku")]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@farm.test")]
    pub email: String,

    #[schema(example = "+254700000000")]
    pub phone: Option<String>,

    #[validate(custom(function = "validate_role"))]
    #[schema(example = "farmer")]
    pub role: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if ROLES.contains(&role.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("role");
        err.message = Some("Role must be one of farmer, buyer, driver, admin".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(role: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Jane".into(),
            email: "jane@farm.test".into(),
            phone: None,
            role: role.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_known_roles() {
        for role in ["farmer", "buyer", "driver", "admin", "Farmer"] {
            assert!(register(role, "secret1").validate().is_ok(), "{role}");
        }
    }

    #[test]
    fn rejects_unknown_role_and_short_password() {
        let errors = register("wizard", "123").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("role"));
        assert!(fields.contains_key("password"));
    }
}
