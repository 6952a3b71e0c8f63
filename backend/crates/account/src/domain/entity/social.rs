//! Social Link Entity

use chrono::{DateTime, Utc};
use kernel::id::{SocialId, UserId};

/// A user's external profile link, unique per (user, identifier)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Social {
    pub id: SocialId,
    pub user_id: UserId,
    /// Short key such as `github` or `linkedin`
    pub identifier: String,
    pub url: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Social {
    pub fn new(user_id: UserId, identifier: String, url: String, details: String) -> Self {
        let now = Utc::now();

        Self {
            id: SocialId::new(),
            user_id,
            identifier,
            url,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
        self.updated_at = Utc::now();
    }

    pub fn set_details(&mut self, details: String) {
        self.details = details;
        self.updated_at = Utc::now();
    }
}
