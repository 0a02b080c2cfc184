//! Access control lists attached to features and tree nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Permission names used by the application.
pub mod permission {
    /// Read access.
    pub const READ: &str = "read";
    /// Write access.
    pub const WRITE: &str = "write";
    /// Delete access.
    pub const DELETE: &str = "delete";
    /// Permission to change the access control list itself.
    pub const ADMINISTRATION: &str = "administration";
}

/// Who is granted one permission.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessControlEntry {
    /// Everybody, including anonymous users, is granted the permission.
    pub guest: bool,
    /// User names.
    pub users: Vec<String>,
    /// Role names.
    pub roles: Vec<String>,
    /// Group names.
    pub groups: Vec<String>,
}

impl AccessControlEntry {
    fn grants(&self, user: Option<&str>, roles: &[&str], groups: &[&str]) -> bool {
        self.guest
            || user.is_some_and(|user| self.users.iter().any(|u| u == user))
            || roles.iter().any(|role| self.roles.iter().any(|r| r == role))
            || groups.iter().any(|group| self.groups.iter().any(|g| g == group))
    }
}

/// Access control list: an owner and one entry per permission.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessControlList {
    /// Owner of the object. The owner is granted every permission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Entries by permission name.
    pub entries: BTreeMap<String, AccessControlEntry>,
}

impl AccessControlList {
    /// Creates an empty list owned by `owner`.
    pub fn owned_by(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            entries: BTreeMap::new(),
        }
    }

    /// Returns the entry of the permission, creating an empty one if missing.
    pub fn entry_mut(&mut self, permission: &str) -> &mut AccessControlEntry {
        self.entries.entry(permission.to_string()).or_default()
    }

    /// Checks whether the given user, with its roles and groups, is granted the permission.
    pub fn is_allowed(
        &self,
        permission: &str,
        user: Option<&str>,
        roles: &[&str],
        groups: &[&str],
    ) -> bool {
        if user.is_some() && user == self.owner.as_deref() {
            return true;
        }

        self.entries
            .get(permission)
            .is_some_and(|entry| entry.grants(user, roles, groups))
    }
}
