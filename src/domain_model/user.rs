use serde::Serialize;
use std::fmt;

/// Opaque identifier assigned by the document store.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Raw password as typed by the client. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Username/password pair used as a lookup or creation key.
///
/// Both fields are plain strings; there is no way to smuggle a structured
/// value through this type into a store filter.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty once trimmed but is stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Password,
}

impl Credentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CredentialsError::EmptyUsername);
        }
        if password.trim().is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Password(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Password-free projection of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed_password_is_kept() {
        let creds = Credentials::try_from_parts("  alice ", " p1 ").unwrap();
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password().expose(), " p1 ");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            Credentials::try_from_parts("   ", "p1"),
            Err(CredentialsError::EmptyUsername)
        );
        assert_eq!(
            Credentials::try_from_parts("alice", ""),
            Err(CredentialsError::EmptyPassword)
        );
        assert_eq!(
            Credentials::try_from_parts("alice", " \t"),
            Err(CredentialsError::EmptyPassword)
        );
    }

    #[test]
    fn debug_never_prints_password() {
        let creds = Credentials::try_from_parts("alice", "hunter2").unwrap();
        let printed = format!("{creds:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn view_serializes_without_password() {
        let view = UserView {
            id: UserId("665f1c2e9b1e8a0012345678".to_string()),
            username: "alice".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "665f1c2e9b1e8a0012345678", "username": "alice"})
        );
    }
}
