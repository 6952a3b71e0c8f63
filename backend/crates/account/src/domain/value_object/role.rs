//! Roles and capability tiers
//!
//! A user holds any number of [`Role`]s. Routes are gated by a
//! [`CapabilityTier`], an explicit OR-set of roles: there is no implied
//! ordering between roles beyond what each tier lists.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// ユーザーに付与される権限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("root")]
    Root,
    #[display("admin")]
    Admin,
    #[display("moderator")]
    Moderator,
    #[display("helper")]
    Helper,
}

impl Role {
    /// データベース・トークン上の表現
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Helper => "helper",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "root" => Some(Role::Root),
            "admin" => Some(Role::Admin),
            "moderator" => Some(Role::Moderator),
            "helper" => Some(Role::Helper),
            _ => None,
        }
    }
}

/// Role descriptor as carried in tokens and user payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub descriptor: Role,
}

impl From<Role> for Authority {
    fn from(descriptor: Role) -> Self {
        Self { descriptor }
    }
}

/// ルートを保護する権限レベル
///
/// 各レベルは許可するロールの集合で、保持ロールとの積集合が空でなければ通過します。
///
/// ## Examples
/// ```rust
/// use account::domain::value_object::role::{CapabilityTier, Role};
///
/// assert!(CapabilityTier::Helper.permits([Role::Helper]));
/// assert!(!CapabilityTier::Moderator.permits([Role::Helper]));
/// assert!(CapabilityTier::Admin.permits([Role::Helper, Role::Root]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CapabilityTier {
    #[display("helper")]
    Helper,
    #[display("moderator")]
    Moderator,
    #[display("admin")]
    Admin,
}

impl CapabilityTier {
    /// このレベルを満たすロール
    pub const fn allowed(&self) -> &'static [Role] {
        match self {
            CapabilityTier::Helper => &[Role::Root, Role::Admin, Role::Moderator, Role::Helper],
            CapabilityTier::Moderator => &[Role::Root, Role::Admin, Role::Moderator],
            CapabilityTier::Admin => &[Role::Root, Role::Admin],
        }
    }

    pub fn permits<I>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = Role>,
    {
        let allowed = self.allowed();
        roles.into_iter().any(|role| allowed.contains(&role))
    }
}
