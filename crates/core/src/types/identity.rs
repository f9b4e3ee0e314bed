//! Signed-in identity.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// The user record held for the current session.
///
/// `is_admin` is decided once, when the identity is issued, and travels with
/// the record from then on. Restoring a stored identity does not re-check it.
///
/// `email` is whatever the user signed in with. It is not validated, so a
/// plain username is as good as an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub is_admin: bool,
}

impl Identity {
    /// Create an identity.
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_is_admin() {
        let identity = Identity::new(UserId::new("1"), "admin@authenticwear.com", true);
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","email":"admin@authenticwear.com","isAdmin":true}"#
        );

        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_restores_any_email_string() {
        let parsed: Identity =
            serde_json::from_str(r#"{"id":"1","email":"shopper","isAdmin":false}"#).unwrap();
        assert_eq!(parsed.email, "shopper");
        assert!(!parsed.is_admin);
    }
}
