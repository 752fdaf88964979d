//! Entity definitions for users, families, and family-owned items.
//!
//! Relations are expressed arena-style: entities reference each other by
//! integer id only. A [`Family`] owns its todo and shopping-list collections
//! (they are keyed by `family_id` in storage); users, authors, executors and
//! updaters are back-references, never owning pointers, so the
//! Family-User-Todo relationship graph stays acyclic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type FamilyId = i64;
pub type ItemId = i64;

/// A user snapshot as seen by the authorization core.
///
/// `is_family_head` is derived from [`Family::head_id`] when the snapshot is
/// assembled, so a user without a family reference can never appear as a
/// head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
    pub is_family_head: bool,
    pub family_id: Option<FamilyId>,
}

impl User {
    /// Whether the user belongs to a family.
    pub fn has_family(&self) -> bool {
        self.family_id.is_some()
    }
}

/// A family record.
///
/// `head_id` is the single source of truth for headship: exactly one member
/// of a non-empty family is the head at any time, and a head transfer is a
/// single write of this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: FamilyId,
    pub name: String,
    pub head_id: Option<UserId>,
    pub member_ids: Vec<UserId>,
}

/// A shared family todo.
///
/// Invariant: `executor_id` is `Some` only while `is_done` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: ItemId,
    pub family_id: FamilyId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub is_done: bool,
    pub author_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updater_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shared family shopping list.
///
/// Items are kept as two name lists split by completion state at submission
/// time. The executor/updater invariants match [`Todo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: ItemId,
    pub family_id: FamilyId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub is_done: bool,
    pub upcoming_items: Vec<String>,
    pub done_items: Vec<String>,
    pub author_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updater_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
