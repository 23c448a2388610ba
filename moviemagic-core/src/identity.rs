use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated principal a request is made on behalf of.
///
/// Produced by the HTTP layer after token verification and passed explicitly
/// into every workflow call; the workflow never reads ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    username: String,
}

impl CallerIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into() }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
