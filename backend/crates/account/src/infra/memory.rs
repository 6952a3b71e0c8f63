//! In-Memory Repository Implementations
//!
//! A process-local store with the same uniqueness and record-not-found
//! behavior as the PostgreSQL schema. Used by router-level tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use kernel::validation::fits_meta_description;
use tokio::sync::RwLock;

use crate::domain::entity::{social::Social, stack::Stack, user::User};
use crate::domain::repository::{
    SocialRepository, StackRepository, StoreError, StoreResult, UserRepository,
};
use crate::domain::value_object::public_id::PublicId;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    socials: Vec<Social>,
    stacks: Vec<Stack>,
}

/// Memory-backed account store (cheap to clone, clones share data)
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unique_user_check(tables: &Tables, user: &User) -> StoreResult<()> {
    for other in tables.users.values().filter(|u| u.id != user.id) {
        if other.email == user.email {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        if other.username == user.username {
            return Err(StoreError::UniqueViolation("users_username_key".into()));
        }
        if other.uid == user.uid {
            return Err(StoreError::UniqueViolation("users_uid_key".into()));
        }
    }
    Ok(())
}

fn unique_stack_check(tables: &Tables, stack: &Stack) -> StoreResult<()> {
    // VARCHAR(160) 列と同じ上限（PostgreSQL でも未分類の失敗）
    if !fits_meta_description(&stack.meta_description) {
        return Err(StoreError::InvalidRow("stacks.meta_description too long".into()));
    }
    for other in tables.stacks.iter().filter(|s| s.id != stack.id) {
        if other.name == stack.name {
            return Err(StoreError::UniqueViolation("stacks_name_key".into()));
        }
        if other.slug == stack.slug {
            return Err(StoreError::UniqueViolation("stacks_slug_key".into()));
        }
    }
    Ok(())
}

impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        unique_user_check(&tables, user)?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_uid(&self, uid: &PublicId) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.uid == *uid).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn count_by_username(&self, username: &str) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().filter(|u| u.username == username).count() as u64)
    }

    async fn count_by_email(&self, email: &str) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().filter(|u| u.email == email).count() as u64)
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(StoreError::RecordNotFound);
        }
        unique_user_check(&tables, user)?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }
}

impl SocialRepository for MemoryStore {
    async fn list_socials(&self, user_id: &UserId) -> StoreResult<Vec<Social>> {
        let tables = self.tables.read().await;
        Ok(tables
            .socials
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn find_social(
        &self,
        user_id: &UserId,
        identifier: &str,
    ) -> StoreResult<Option<Social>> {
        let tables = self.tables.read().await;
        Ok(tables
            .socials
            .iter()
            .find(|s| s.user_id == *user_id && s.identifier == identifier)
            .cloned())
    }

    async fn create_social(&self, social: &Social) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .socials
            .iter()
            .any(|s| s.user_id == social.user_id && s.identifier == social.identifier)
        {
            return Err(StoreError::UniqueViolation(
                "socials_user_id_identifier_key".into(),
            ));
        }
        tables.socials.push(social.clone());
        Ok(())
    }

    async fn update_social(&self, social: &Social) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .socials
            .iter_mut()
            .find(|s| s.id == social.id)
            .ok_or(StoreError::RecordNotFound)?;
        *slot = social.clone();
        Ok(())
    }

    async fn delete_social(&self, user_id: &UserId, identifier: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.socials.len();
        tables
            .socials
            .retain(|s| !(s.user_id == *user_id && s.identifier == identifier));

        if tables.socials.len() == before {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}

impl StackRepository for MemoryStore {
    async fn list_enabled(&self, take: i64, skip: i64) -> StoreResult<Vec<Stack>> {
        let tables = self.tables.read().await;
        let mut stacks: Vec<Stack> = tables.stacks.iter().filter(|s| s.enabled).cloned().collect();
        stacks.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(stacks
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(0))
            .take(usize::try_from(take).unwrap_or(0))
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Stack>> {
        let tables = self.tables.read().await;
        Ok(tables.stacks.iter().find(|s| s.slug == slug).cloned())
    }

    async fn find_by_slug_or_name(&self, key: &str) -> StoreResult<Option<Stack>> {
        let tables = self.tables.read().await;
        let by_slug = tables.stacks.iter().find(|s| s.slug == key);
        Ok(by_slug
            .or_else(|| tables.stacks.iter().find(|s| s.name == key))
            .cloned())
    }

    async fn find_conflicting(&self, name: &str, slug: &str) -> StoreResult<Option<Stack>> {
        let tables = self.tables.read().await;
        let by_name = tables.stacks.iter().find(|s| s.name == name);
        Ok(by_name
            .or_else(|| tables.stacks.iter().find(|s| s.slug == slug))
            .cloned())
    }

    async fn create_stack(&self, stack: &Stack) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        unique_stack_check(&tables, stack)?;
        tables.stacks.push(stack.clone());
        Ok(())
    }

    async fn update_stack(&self, stack: &Stack) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        unique_stack_check(&tables, stack)?;
        let slot = tables
            .stacks
            .iter_mut()
            .find(|s| s.id == stack.id)
            .ok_or(StoreError::RecordNotFound)?;
        *slot = stack.clone();
        Ok(())
    }

    async fn set_stack_enabled(&self, slug: &str, enabled: bool) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let stack = tables
            .stacks
            .iter_mut()
            .find(|s| s.slug == slug && s.enabled != enabled)
            .ok_or(StoreError::RecordNotFound)?;
        stack.enabled = enabled;
        stack.updated_at = Utc::now();
        Ok(())
    }
}
