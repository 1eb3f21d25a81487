//! User, role and authentication domain model

use serde::{Deserialize, Serialize};

/// Authorization role as issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_MEMBER")]
    Member,
    #[serde(rename = "ROLE_READER")]
    Reader,
}

/// A registered user. A user may hold several roles at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Avatar image URL
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    /// Role check is set membership, not an exclusive level
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_member(&self) -> bool {
        self.has_role(Role::Member)
    }

    pub fn is_reader(&self) -> bool {
        self.has_role(Role::Reader)
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Successful authentication payload: token and profile arrive together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

/// Fields for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    /// Avatar image URL
    #[serde(default)]
    pub image: String,
}

impl Registration {
    /// Validate registration data before submission
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.firstname.trim().is_empty() {
            return Err("first name cannot be empty");
        }
        if self.lastname.trim().is_empty() {
            return Err("last name cannot be empty");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("a valid email is required");
        }
        if self.password.is_empty() {
            return Err("password cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(roles: Vec<Role>) -> User {
        User {
            id: 1,
            firstname: "Ada".to_string(),
            lastname: "Chan".to_string(),
            email: "ada@example.com".to_string(),
            image: "https://img.example/ada.png".to_string(),
            roles,
        }
    }

    #[test]
    fn test_roles_serialize_with_backend_prefix() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, r#""ROLE_ADMIN""#);

        let role: Role = serde_json::from_str(r#""ROLE_READER""#).unwrap();
        assert_eq!(role, Role::Reader);
    }

    #[test]
    fn test_role_checks_are_membership_tests() {
        let user = sample_user(vec![Role::Admin, Role::Member]);
        assert!(user.is_admin());
        assert!(user.is_member());
        assert!(!user.is_reader());

        let reader = sample_user(vec![Role::Reader]);
        assert!(!reader.is_admin());
        assert!(reader.is_reader());
    }

    #[test]
    fn test_user_parses_without_roles_or_image() {
        let json = r#"{"id": 3, "firstname": "Mai", "lastname": "S", "email": "mai@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.image.is_empty());
    }

    #[test]
    fn test_registration_validation() {
        let mut reg = Registration {
            firstname: "Ada".to_string(),
            lastname: "Chan".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            image: String::new(),
        };
        assert!(reg.validate().is_ok());

        reg.email = "not-an-email".to_string();
        assert!(reg.validate().is_err());
    }
}
