use serde::{Deserialize, Serialize};

use super::auth::UserInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
    pub created_by: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            email: u.email.clone(),
            is_admin: u.is_admin,
        }
    }
}

/// Body of `POST /api/v1/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        let username = self.username.trim();
        if username.is_empty() || username.chars().count() > 50 {
            return Err("username must be 1-50 characters".into());
        }
        if self.password.chars().count() < 6 {
            return Err("password must be at least 6 characters".into());
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !email.contains('@') || email.chars().count() > 100 {
                return Err("email is not valid".into());
            }
        }
        Ok(())
    }
}

/// Body of `PUT /api/v1/auth/me`.
///
/// Only profile fields are accepted; a role sent along (`is_admin`) is
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

fn cleared(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl UpdateProfileDto {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(email) = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !email.contains('@') || email.chars().count() > 100 {
                return Err("email is not valid".into());
            }
        }
        if let Some(name) = &self.full_name {
            if name.trim().chars().count() > 100 {
                return Err("full_name must be at most 100 characters".into());
            }
        }
        Ok(())
    }

    /// Absent fields stay as they are; blank ones are cleared
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = cleared(email);
        }
        if let Some(name) = &self.full_name {
            user.full_name = cleared(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(username: &str, password: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.into(),
            password: password.into(),
            email: None,
            full_name: None,
            is_admin: false,
        }
    }

    #[test]
    fn create_user_rules() {
        assert!(dto("operator", "secret1").validate().is_ok());
        assert!(dto(" ", "secret1").validate().is_err());
        assert!(dto("operator", "123").validate().is_err());

        let mut bad_email = dto("operator", "secret1");
        bad_email.email = Some("nope".into());
        assert!(bad_email.validate().is_err());
    }

    fn operator() -> User {
        User {
            id: "u-1".into(),
            username: "operator".into(),
            email: Some("old@example.com".into()),
            full_name: Some("Old Name".into()),
            is_active: true,
            is_admin: false,
            created_at: "2025-03-01T00:00:00Z".into(),
            updated_at: "2025-03-01T00:00:00Z".into(),
            last_login_at: None,
            created_by: None,
        }
    }

    #[test]
    fn profile_update_cannot_raise_role() {
        let dto: UpdateProfileDto = serde_json::from_str(
            r#"{"full_name": "  New Name ", "is_admin": true, "role": "super_admin"}"#,
        )
        .unwrap();
        let mut user = operator();
        dto.apply(&mut user);

        assert!(!user.is_admin);
        assert_eq!(user.full_name.as_deref(), Some("New Name"));
        assert_eq!(user.email.as_deref(), Some("old@example.com"));
    }

    #[test]
    fn profile_update_clears_blank_fields() {
        let dto = UpdateProfileDto {
            email: Some(" ".into()),
            full_name: None,
        };
        assert!(dto.validate().is_ok());
        let mut user = operator();
        dto.apply(&mut user);
        assert_eq!(user.email, None);
        assert_eq!(user.full_name.as_deref(), Some("Old Name"));

        let bad = UpdateProfileDto {
            email: Some("nope".into()),
            full_name: None,
        };
        assert!(bad.validate().is_err());
    }
}
