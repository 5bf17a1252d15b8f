//! User-related DTOs for API requests and responses.
//!
//! The create request is the only place a plaintext password crosses the
//! boundary, and it is write-only: no response DTO has a password field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Role, User, UserChanges};

// ============================================================================
// Request DTOs
// ============================================================================

/// Reference to an existing role by id.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleRef {
    pub id: i64,
}

/// Request body for creating a user. Carries the write-only password.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "First name must not be blank"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must not be blank"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 4, max = 72, message = "Password must be between 4 and 72 characters"))]
    #[schema(format = "password", min_length = 4, max_length = 72)]
    pub password: String,
    /// Roles referenced by id; each must exist.
    #[serde(default)]
    pub roles: Vec<RoleRef>,
}

impl CreateUserRequest {
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|r| r.id).collect()
    }
}

/// Request body for updating a user.
///
/// No password field: updates overwrite the profile and replace the role
/// set, nothing else.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "First name must not be blank"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must not be blank"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleRef>,
}

impl UpdateUserRequest {
    /// Splits the request into the profile changeset and the role ids.
    pub fn into_user_changes(self) -> (UserChanges, Vec<i64>) {
        let role_ids = self.roles.iter().map(|r| r.id).collect();
        (
            UserChanges {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
            },
            role_ids,
        )
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for role data.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleResponse {
    pub id: i64,
    pub authority: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            authority: role.authority,
        }
    }
}

/// Response body for user data. Excludes the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<RoleResponse>,
}

impl UserResponse {
    /// Builds the response from a user and their loaded role set.
    pub fn from_parts(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            first_name: "Maria".to_string(),
            last_name: "Brown".to_string(),
            email: "maria@gmail.com".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$hash".to_string(),
        }
    }

    #[test]
    fn test_response_never_contains_password() {
        let role = Role {
            id: 1,
            authority: "ROLE_OPERATOR".to_string(),
        };

        let response = UserResponse::from_parts(sample_user(), vec![role]);
        let body = serde_json::to_string(&response).unwrap();

        assert!(!body.contains("password"));
        assert!(!body.contains("argon2"));
        assert!(body.contains("maria@gmail.com"));
    }

    #[test]
    fn test_create_request_validation() {
        let request: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "first_name": "",
            "last_name": "Brown",
            "email": "not-an-email",
            "password": "1234"
        }))
        .unwrap();

        let errors: crate::error::AppError = request.validate().unwrap_err().into();
        match errors {
            crate::error::AppError::ValidationErrors { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"first_name"));
                assert!(fields.contains(&"email"));
                // "1234" satisfies the length rule; only the blank name and
                // bad email fail
                assert!(!fields.contains(&"password"));
            }
            _ => panic!("Expected ValidationErrors"),
        }
    }

    #[test]
    fn test_update_request_has_no_password_field() {
        let result: Result<UpdateUserRequest, _> = serde_json::from_value(serde_json::json!({
            "first_name": "Maria",
            "last_name": "Brown",
            "email": "maria@gmail.com",
            "roles": [{"id": 1}]
        }));

        let request = result.unwrap();
        let (changes, role_ids) = request.into_user_changes();
        assert_eq!(changes.email, "maria@gmail.com");
        assert_eq!(role_ids, vec![1]);
    }
}
