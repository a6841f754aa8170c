use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload read from the `access_token` cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,     // user ID
    pub role: String, // authorization role
    pub iat: usize,   // issued at (unix timestamp)
    pub exp: usize,   // expires at (unix timestamp)
}

/// Identity attached to a request once its token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub role: String,
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Self { id: c.id, role: c.role }
    }
}
