use serde::{Deserialize, Serialize};
use std::fmt;

/// JWT claims carried by access tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (UUID string)
    pub sub: String,

    /// Role at token issue time
    pub role: String,

    /// Expiration (unix timestamp, seconds)
    pub exp: i64,

    /// Issued-at (unix timestamp, seconds)
    pub iat: i64,
}

/// Closed set of user roles
///
/// Stored as a string column; parsed once at the storage boundary so the
/// rest of the code matches on the enum instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse a stored role string. Unknown values map to the least
    /// privileged role.
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_maps_unknown_roles_to_user() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("user"), UserRole::User);
        assert_eq!(UserRole::parse("superuser"), UserRole::User);
        assert_eq!(UserRole::parse(""), UserRole::User);
    }
}
