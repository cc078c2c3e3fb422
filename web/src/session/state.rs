//! Credential shape and the storage keys it lives under

use serde::{Deserialize, Serialize};

use crate::models::AuthResponse;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "authToken";
/// Storage key for the principal name
pub const USERNAME_KEY: &str = "username";
/// Storage key for the principal's role
pub const ROLE_KEY: &str = "role";

/// Every key a credential occupies, in write order
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USERNAME_KEY, ROLE_KEY];

/// The authenticated principal for this session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub username: String,
    pub role: String,
}

impl From<AuthResponse> for Credential {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            username: response.username,
            role: response.role,
        }
    }
}

impl Credential {
    /// Values paired with their storage keys
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (TOKEN_KEY, self.token.as_str()),
            (USERNAME_KEY, self.username.as_str()),
            (ROLE_KEY, self.role.as_str()),
        ]
    }
}
