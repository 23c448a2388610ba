use moviemagic_shared::Masked;
use serde::{Deserialize, Serialize};

/// A registered account. `password_hash` is a PHC-format digest, never the raw password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub email: Masked<String>,
}

impl User {
    pub fn new(username: String, password_hash: String, email: String) -> Self {
        Self {
            username,
            password_hash,
            email: Masked(email),
        }
    }

    /// The address to notify, if one is on file
    pub fn notification_address(&self) -> Option<&str> {
        let email = self.email.expose().trim();
        if email.is_empty() {
            None
        } else {
            Some(email)
        }
    }
}
