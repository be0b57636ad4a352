use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserProfile};

/// Identity of the logged-in user, handed to every operation that acts on
/// their behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: &User) -> Self {
        Self {
            user: user.profile(),
            started_at: Utc::now(),
        }
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}
