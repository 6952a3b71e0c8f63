//! Internal Row Identifiers
//!
//! UUID primary keys tagged with the entity they belong to, so a social link
//! id cannot be passed where a user id is expected. These never leave the
//! server; clients only see public ids.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// エンティティ種別付きの内部 ID
///
/// ## Examples
/// ```
/// use kernel::id::{StackId, UserId};
///
/// let user = UserId::new();
/// let same = UserId::from_uuid(*user.as_uuid());
/// assert_eq!(user, same);
///
/// let _stack = StackId::new(); // 型が違うため `user` と比較できない
/// ```
pub struct Id<Entity> {
    uuid: Uuid,
    entity: PhantomData<fn() -> Entity>,
}

impl<Entity> Id<Entity> {
    /// 新しい ID（UUID v4）
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// 保存済みの行から復元
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            entity: PhantomData,
        }
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

// 手動実装: `Entity` に境界を要求しない
impl<Entity> Clone for Id<Entity> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Entity> Copy for Id<Entity> {}

impl<Entity> PartialEq for Id<Entity> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<Entity> Eq for Id<Entity> {}

impl<Entity> std::hash::Hash for Id<Entity> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<Entity> Default for Id<Entity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Entity> fmt::Debug for Id<Entity> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.uuid).finish()
    }
}

impl<Entity> fmt::Display for Id<Entity> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

/// Entity tags
pub mod entity {
    pub enum User {}
    pub enum Social {}
    pub enum Stack {}
}

pub type UserId = Id<entity::User>;
pub type SocialId = Id<entity::Social>;
pub type StackId = Id<entity::Stack>;
