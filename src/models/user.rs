//! Account models: profiles, roles, and the transient request bodies
//! used to obtain a session.

use serde::{Deserialize, Serialize};

/// Account role. The server only knows these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }

    /// Parse a role from user input. Accepts any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "professor" => Some(Role::Professor),
            _ => None,
        }
    }
}

/// The current user as returned by the "who am I" check.
/// Immutable from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student as listed in classroom rosters and the student directory.
/// Some endpoints omit the email, so it defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login request body. Held only for the duration of the request,
/// never persisted anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        assert_eq!(
            serde_json::to_string(&Role::Professor).unwrap(),
            "\"professor\""
        );
        let role: Role = serde_json::from_str("\"professor\"").unwrap();
        assert_eq!(role, Role::Professor);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("Professor"), Some(Role::Professor));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_parse_profile() {
        let json = r#"{"id": 3, "email": "ada@example.edu", "first_name": "Ada",
                       "last_name": "Lovelace", "role": "professor"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 3);
        assert_eq!(profile.role, Role::Professor);
        assert_eq!(profile.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_parse_student_without_email() {
        // The review queue embeds students without an email field
        let json = r#"{"id": 7, "first_name": "Tom", "last_name": "Sawyer"}"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.full_name(), "Tom Sawyer");
        assert!(student.email.is_empty());
    }
}
