//! Defines the token stored in the auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::user::UserID;

/// A token for authorization and authentication.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Token {
    /// The user the token was issued to.
    pub user_id: UserID,

    /// When the token stops being accepted.
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl Token {
    /// Whether the token has passed its expiry time at `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod token_tests {
    use time::{Duration, macros::datetime};

    use crate::{auth::Token, user::UserID};

    #[test]
    fn serializes_expiry_as_unix_timestamp() {
        let token = Token {
            user_id: UserID::new(1),
            expires_at: datetime!(2024-01-01 00:00:00 UTC),
        };

        let json = serde_json::to_string(&token).unwrap();

        assert_eq!(json, r#"{"user_id":1,"expires_at":1704067200}"#);
        assert_eq!(serde_json::from_str::<Token>(&json).unwrap(), token);
    }

    #[test]
    fn expires_at_expiry_time() {
        let expires_at = datetime!(2024-01-01 00:00:00 UTC);
        let token = Token {
            user_id: UserID::new(1),
            expires_at,
        };

        assert!(!token.is_expired(expires_at - Duration::seconds(1)));
        assert!(token.is_expired(expires_at));
        assert!(token.is_expired(expires_at + Duration::seconds(1)));
    }
}
