//! User Entity
//!
//! The account aggregate: profile, credentials, status flags and roles.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{public_id::PublicId, role::Role};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (never exposed)
    pub id: UserId,
    /// Public identifier carried in tokens
    pub uid: PublicId,
    pub name: String,
    /// Handle (unique)
    pub username: String,
    /// Login e-mail (unique)
    pub email: String,
    pub email_verified: bool,
    pub bio: Option<String>,
    pub password: HashedPassword,
    /// `false` blocks every authenticated operation
    pub enabled: bool,
    /// Administrative lock
    pub locked: bool,
    pub authorities: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, enabled, unverified user without roles
    pub fn new(name: String, username: String, email: String, password: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            uid: PublicId::new(),
            name,
            username,
            email,
            email_verified: false,
            bio: None,
            password,
            enabled: true,
            locked: false,
            authorities: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the account may act
    pub fn is_active(&self) -> bool {
        self.enabled && !self.locked
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.touch();
    }

    pub fn set_bio(&mut self, bio: String) {
        self.bio = Some(bio);
        self.touch();
    }

    /// Replace the e-mail; the new address starts unverified
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.email_verified = false;
        self.touch();
    }

    pub fn set_password(&mut self, password: HashedPassword) {
        self.password = password;
        self.touch();
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.touch();
    }

    pub fn grant(&mut self, role: Role) {
        if !self.authorities.contains(&role) {
            self.authorities.push(role);
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
