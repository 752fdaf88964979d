//! FamilyStore trait definition.

use async_trait::async_trait;

use hearth_domain::{Family, FamilyId, ItemId, ShoppingList, Todo, User, UserId};

use crate::error::StorageResult;

/// A family record together with its resolved members.
#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub family: Family,
    pub members: Vec<User>,
}

/// A resolved user together with their family, if any.
///
/// `user.is_family_head` is derived from `family.head_id` at resolution
/// time, so the snapshot can never show a head outside their family and two
/// snapshots of the same family never disagree on who the head is.
#[derive(Debug, Clone)]
pub struct UserSnapshot {
    pub user: User,
    pub family: Option<FamilySnapshot>,
}

/// Abstract storage interface for family-scoped data.
///
/// Implementations must be thread-safe (`Send + Sync`) and provide
/// immediately-consistent reads after writes within one logical operation.
/// Item operations are family-scoped: an item id belonging to another
/// family behaves exactly like a missing id.
#[async_trait]
pub trait FamilyStore: Send + Sync + 'static {
    // Identity resolution

    /// Resolves a user id to a user-with-family snapshot.
    ///
    /// Returns `Ok(None)` when no such user exists; that is an expected
    /// outcome (a valid credential for a deleted account), not an error.
    async fn resolve_user(&self, user_id: UserId) -> StorageResult<Option<UserSnapshot>>;

    // Family-head transfer

    /// Moves headship of a family to another member as a single atomic
    /// write.
    ///
    /// Concurrent transfers on the same family serialize
    /// (last-committed-wins); no intermediate two-head or zero-head state is
    /// observable. Fails when the family does not exist or the target is not
    /// a member.
    async fn transfer_family_head(&self, family_id: FamilyId, to: UserId) -> StorageResult<()>;

    // Todos

    /// Inserts a todo (id 0) or replaces the stored todo with the same id.
    async fn save_todo(&self, todo: Todo) -> StorageResult<Todo>;

    /// Finds a todo within the family scope.
    async fn find_todo(&self, family_id: FamilyId, todo_id: ItemId)
        -> StorageResult<Option<Todo>>;

    /// Lists all todos owned by the family.
    async fn list_todos(&self, family_id: FamilyId) -> StorageResult<Vec<Todo>>;

    /// Removes and returns a todo within the family scope.
    async fn remove_todo(&self, family_id: FamilyId, todo_id: ItemId) -> StorageResult<Todo>;

    /// Deletes all todos owned by the family, returning the removed count.
    async fn delete_all_todos(&self, family_id: FamilyId) -> StorageResult<u64>;

    // Shopping lists

    /// Inserts a shopping list (id 0) or replaces the stored list with the
    /// same id.
    async fn save_shopping_list(&self, list: ShoppingList) -> StorageResult<ShoppingList>;

    /// Finds a shopping list within the family scope.
    async fn find_shopping_list(
        &self,
        family_id: FamilyId,
        list_id: ItemId,
    ) -> StorageResult<Option<ShoppingList>>;

    /// Lists all shopping lists owned by the family.
    async fn list_shopping_lists(&self, family_id: FamilyId) -> StorageResult<Vec<ShoppingList>>;

    /// Removes and returns a shopping list within the family scope.
    async fn remove_shopping_list(
        &self,
        family_id: FamilyId,
        list_id: ItemId,
    ) -> StorageResult<ShoppingList>;

    /// Deletes all shopping lists owned by the family, returning the removed
    /// count.
    async fn delete_all_shopping_lists(&self, family_id: FamilyId) -> StorageResult<u64>;
}
