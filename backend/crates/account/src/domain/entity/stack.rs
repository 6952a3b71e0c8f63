//! Stack Entity
//!
//! A named technology entry, addressed publicly by its slug.

use chrono::{DateTime, Utc};
use kernel::id::StackId;
use kernel::validation::slugify;

use crate::domain::value_object::public_id::PublicId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub id: StackId,
    /// Display name (unique)
    pub name: String,
    /// Derived from `name` (unique)
    pub slug: String,
    pub description: String,
    pub meta_description: String,
    /// Disabled stacks are hidden from every public read
    pub enabled: bool,
    pub created_by: PublicId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stack {
    pub fn new(
        name: String,
        description: String,
        meta_description: String,
        created_by: PublicId,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: StackId::new(),
            slug: slugify(&name),
            name,
            description,
            meta_description,
            enabled: true,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename and re-derive the slug
    pub fn rename(&mut self, name: String) {
        self.slug = slugify(&name);
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    pub fn set_meta_description(&mut self, meta_description: String) {
        self.meta_description = meta_description;
        self.updated_at = Utc::now();
    }
}
