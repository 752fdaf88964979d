//! In-memory storage implementation for tests and development.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use hearth_domain::{Family, FamilyId, ItemId, ShoppingList, Todo, User, UserId};

use crate::error::{StorageError, StorageResult};
use crate::traits::{FamilySnapshot, FamilyStore, UserSnapshot};

/// In-memory implementation of [`FamilyStore`].
///
/// Uses `DashMap` for thread-safe concurrent access. Item collections are
/// keyed by family id, matching the ownership model: a family owns its todos
/// and shopping lists, and every item lookup is scoped by the owning family.
///
/// Headship lives only in `Family::head_id`, so a head transfer is a single
/// write under the family's map entry; concurrent transfers on the same
/// family serialize there and readers never observe a two-head state.
#[derive(Debug, Default)]
pub struct MemoryFamilyStore {
    users: DashMap<UserId, User>,
    families: DashMap<FamilyId, Family>,
    todos: DashMap<FamilyId, Vec<Todo>>,
    shopping_lists: DashMap<FamilyId, Vec<ShoppingList>>,
    next_user_id: AtomicI64,
    next_family_id: AtomicI64,
    next_item_id: AtomicI64,
}

impl MemoryFamilyStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty in-memory store wrapped in `Arc`.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Seeds a family. Registration flows live outside this crate, so tests
    /// and the development binary populate the store through these helpers.
    pub fn add_family(&self, name: &str) -> FamilyId {
        let id = self.next_family_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.families.insert(
            id,
            Family {
                id,
                name: name.to_string(),
                head_id: None,
                member_ids: Vec::new(),
            },
        );
        id
    }

    /// Seeds a user, optionally joining a family. The first member of a
    /// family becomes its head.
    pub fn add_user(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        is_verified: bool,
        family_id: Option<FamilyId>,
    ) -> UserId {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.users.insert(
            id,
            User {
                id,
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                is_verified,
                is_family_head: false,
                family_id,
            },
        );

        if let Some(family_id) = family_id {
            if let Some(mut family) = self.families.get_mut(&family_id) {
                family.member_ids.push(id);
                if family.head_id.is_none() {
                    family.head_id = Some(id);
                }
            }
        }

        id
    }

    /// Seeds a specific head, overriding the first-member default.
    pub fn set_family_head(&self, family_id: FamilyId, head_id: UserId) {
        if let Some(mut family) = self.families.get_mut(&family_id) {
            if family.member_ids.contains(&head_id) {
                family.head_id = Some(head_id);
            }
        }
    }

    fn family_snapshot(&self, family_id: FamilyId) -> Option<FamilySnapshot> {
        let family = self.families.get(&family_id)?.clone();
        let members = family
            .member_ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| u.clone()))
            .map(|mut member| {
                member.is_family_head = family.head_id == Some(member.id);
                member
            })
            .collect();
        Some(FamilySnapshot { family, members })
    }

    fn next_item_id(&self) -> ItemId {
        self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl FamilyStore for MemoryFamilyStore {
    async fn resolve_user(&self, user_id: UserId) -> StorageResult<Option<UserSnapshot>> {
        let Some(record) = self.users.get(&user_id) else {
            return Ok(None);
        };
        let mut user = record.clone();
        drop(record);

        let family = user.family_id.and_then(|id| self.family_snapshot(id));
        user.is_family_head = family
            .as_ref()
            .is_some_and(|snapshot| snapshot.family.head_id == Some(user.id));

        Ok(Some(UserSnapshot { user, family }))
    }

    #[instrument(skip(self))]
    async fn transfer_family_head(&self, family_id: FamilyId, to: UserId) -> StorageResult<()> {
        let mut family = self
            .families
            .get_mut(&family_id)
            .ok_or(StorageError::FamilyNotFound { family_id })?;

        if !family.member_ids.contains(&to) {
            return Err(StorageError::NotAFamilyMember {
                family_id,
                user_id: to,
            });
        }

        // Single write while holding the family entry: concurrent transfers
        // serialize here and the family always has exactly one head.
        family.head_id = Some(to);
        Ok(())
    }

    async fn save_todo(&self, mut todo: Todo) -> StorageResult<Todo> {
        let now = chrono::Utc::now();
        let mut items = self.todos.entry(todo.family_id).or_default();

        if todo.id == 0 {
            todo.id = self.next_item_id();
            todo.created_at = now;
            todo.updated_at = now;
            items.push(todo.clone());
        } else {
            let existing = items
                .iter_mut()
                .find(|item| item.id == todo.id)
                .ok_or(StorageError::ItemNotFound { item_id: todo.id })?;
            todo.created_at = existing.created_at;
            todo.updated_at = now;
            *existing = todo.clone();
        }

        Ok(todo)
    }

    async fn find_todo(
        &self,
        family_id: FamilyId,
        todo_id: ItemId,
    ) -> StorageResult<Option<Todo>> {
        Ok(self
            .todos
            .get(&family_id)
            .and_then(|items| items.iter().find(|item| item.id == todo_id).cloned()))
    }

    async fn list_todos(&self, family_id: FamilyId) -> StorageResult<Vec<Todo>> {
        Ok(self
            .todos
            .get(&family_id)
            .map(|items| items.clone())
            .unwrap_or_default())
    }

    async fn remove_todo(&self, family_id: FamilyId, todo_id: ItemId) -> StorageResult<Todo> {
        let mut items = self
            .todos
            .get_mut(&family_id)
            .ok_or(StorageError::ItemNotFound { item_id: todo_id })?;
        let position = items
            .iter()
            .position(|item| item.id == todo_id)
            .ok_or(StorageError::ItemNotFound { item_id: todo_id })?;
        Ok(items.remove(position))
    }

    #[instrument(skip(self))]
    async fn delete_all_todos(&self, family_id: FamilyId) -> StorageResult<u64> {
        let removed = self
            .todos
            .get_mut(&family_id)
            .map(|mut items| {
                let count = items.len() as u64;
                items.clear();
                count
            })
            .unwrap_or(0);
        Ok(removed)
    }

    async fn save_shopping_list(&self, mut list: ShoppingList) -> StorageResult<ShoppingList> {
        let now = chrono::Utc::now();
        let mut items = self.shopping_lists.entry(list.family_id).or_default();

        if list.id == 0 {
            list.id = self.next_item_id();
            list.created_at = now;
            list.updated_at = now;
            items.push(list.clone());
        } else {
            let existing = items
                .iter_mut()
                .find(|item| item.id == list.id)
                .ok_or(StorageError::ItemNotFound { item_id: list.id })?;
            list.created_at = existing.created_at;
            list.updated_at = now;
            *existing = list.clone();
        }

        Ok(list)
    }

    async fn find_shopping_list(
        &self,
        family_id: FamilyId,
        list_id: ItemId,
    ) -> StorageResult<Option<ShoppingList>> {
        Ok(self
            .shopping_lists
            .get(&family_id)
            .and_then(|items| items.iter().find(|item| item.id == list_id).cloned()))
    }

    async fn list_shopping_lists(&self, family_id: FamilyId) -> StorageResult<Vec<ShoppingList>> {
        Ok(self
            .shopping_lists
            .get(&family_id)
            .map(|items| items.clone())
            .unwrap_or_default())
    }

    async fn remove_shopping_list(
        &self,
        family_id: FamilyId,
        list_id: ItemId,
    ) -> StorageResult<ShoppingList> {
        let mut items = self
            .shopping_lists
            .get_mut(&family_id)
            .ok_or(StorageError::ItemNotFound { item_id: list_id })?;
        let position = items
            .iter()
            .position(|item| item.id == list_id)
            .ok_or(StorageError::ItemNotFound { item_id: list_id })?;
        Ok(items.remove(position))
    }

    #[instrument(skip(self))]
    async fn delete_all_shopping_lists(&self, family_id: FamilyId) -> StorageResult<u64> {
        let removed = self
            .shopping_lists
            .get_mut(&family_id)
            .map(|mut items| {
                let count = items.len() as u64;
                items.clear();
                count
            })
            .unwrap_or(0);
        Ok(removed)
    }
}
