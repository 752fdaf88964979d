//! Shopping-list orchestrator.
//!
//! Same pipeline as the todo orchestrator; the only domain difference is
//! that a list is created from an item collection that gets split into
//! upcoming and done name lists by each item's done flag.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use hearth_domain::messages::{
    default_errors, fields, shopping_lists_errors, shopping_lists_successes,
};
use hearth_domain::payload::{
    check_is_proper_update_payload, ALLOWED_UPDATE_SHOPPING_LIST_KEYS,
};
use hearth_domain::permission::{Condition, ResponseStatus};
use hearth_domain::{ItemId, ShoppingList, TokenService};
use hearth_storage::FamilyStore;

use super::{authorize, require_family, OperationError, OperationResult};

/// One submitted shopping-list item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemInput {
    pub name: String,
    #[serde(default)]
    pub is_done: bool,
}

/// Request body for creating a shopping list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShoppingListRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub items: Vec<ShoppingListItemInput>,
}

/// Orchestrates shopping-list operations.
pub struct ShoppingListHandler<S: FamilyStore> {
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

const MEMBER_CONDITIONS: &[Condition] = &[Condition::IsVerified, Condition::HasFamily];

const HEAD_CONDITIONS: &[Condition] = &[
    Condition::IsVerified,
    Condition::HasFamily,
    Condition::IsFamilyHead,
];

impl<S: FamilyStore> ShoppingListHandler<S> {
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Creates a shopping list for the caller's family.
    #[instrument(skip(self, credential, request))]
    pub async fn create(
        &self,
        credential: &str,
        request: CreateShoppingListRequest,
    ) -> OperationResult<&'static str> {
        if request.title.trim().is_empty() || request.items.is_empty() {
            return Err(OperationError::field(
                fields::PAYLOAD,
                default_errors::IS_REQUIRED,
                ResponseStatus::BadRequest,
            ));
        }

        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        let (done, upcoming): (Vec<_>, Vec<_>) =
            request.items.into_iter().partition(|item| item.is_done);

        let now = chrono::Utc::now();
        let list = ShoppingList {
            id: 0,
            family_id: family.family.id,
            title: request.title,
            deadline: request.deadline.filter(|s| !s.trim().is_empty()),
            is_done: false,
            upcoming_items: upcoming.into_iter().map(|item| item.name).collect(),
            done_items: done.into_iter().map(|item| item.name).collect(),
            author_id: snapshot.user.id,
            executor_id: None,
            updater_id: None,
            created_at: now,
            updated_at: now,
        };

        self.store.save_shopping_list(list).await?;
        Ok(shopping_lists_successes::SHOPPING_LIST_CREATED)
    }

    /// Lists the caller's family shopping lists.
    pub async fn list(&self, credential: &str) -> OperationResult<Vec<ShoppingList>> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        Ok(self.store.list_shopping_lists(family.family.id).await?)
    }

    /// Fetches one shopping list within the caller's family scope.
    pub async fn get(&self, credential: &str, list_id: ItemId) -> OperationResult<ShoppingList> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        self.store
            .find_shopping_list(family.family.id, list_id)
            .await?
            .ok_or_else(|| {
                OperationError::field(
                    fields::SHOPPING_LIST,
                    default_errors::NOT_FOUND,
                    ResponseStatus::NotFound,
                )
            })
    }

    /// Applies a whitelisted update payload to a shopping list.
    #[instrument(skip(self, credential, payload))]
    pub async fn update(
        &self,
        credential: &str,
        list_id: ItemId,
        payload: Map<String, Value>,
    ) -> OperationResult<ShoppingList> {
        if !check_is_proper_update_payload(&payload, ALLOWED_UPDATE_SHOPPING_LIST_KEYS) {
            return Err(OperationError::field(
                fields::PAYLOAD,
                default_errors::NOT_ALLOWED_VALUE,
                ResponseStatus::BadRequest,
            ));
        }

        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        let mut list = self
            .store
            .find_shopping_list(family.family.id, list_id)
            .await?
            .ok_or_else(|| {
                OperationError::field(
                    fields::SHOPPING_LIST,
                    default_errors::NOT_FOUND,
                    ResponseStatus::NotFound,
                )
            })?;

        if let Some(title) = payload.get("title").and_then(Value::as_str) {
            list.title = title.to_string();
        }
        if let Some(deadline) = payload.get("deadline").and_then(Value::as_str) {
            list.deadline = Some(deadline.to_string());
        }
        if let Some(items) = payload.get("upcomingItems").and_then(Value::as_array) {
            list.upcoming_items = string_items(items);
        }
        if let Some(items) = payload.get("doneItems").and_then(Value::as_array) {
            list.done_items = string_items(items);
        }

        let marked_done = payload.get("isDone").and_then(Value::as_bool);
        if let Some(done) = marked_done {
            list.is_done = done;
        }

        list.updater_id = Some(snapshot.user.id);
        list.executor_id = if marked_done == Some(true) {
            Some(snapshot.user.id)
        } else {
            None
        };

        Ok(self.store.save_shopping_list(list).await?)
    }

    /// Removes one shopping list within the caller's family scope.
    pub async fn delete(&self, credential: &str, list_id: ItemId) -> OperationResult<ShoppingList> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        if self
            .store
            .find_shopping_list(family.family.id, list_id)
            .await?
            .is_none()
        {
            return Err(OperationError::field(
                fields::SHOPPING_LIST,
                default_errors::NOT_FOUND,
                ResponseStatus::NotFound,
            ));
        }

        Ok(self
            .store
            .remove_shopping_list(family.family.id, list_id)
            .await?)
    }

    /// Deletes every shopping list the family owns. Head-only; conflicts
    /// when the collection is already empty.
    #[instrument(skip(self, credential))]
    pub async fn delete_all(&self, credential: &str) -> OperationResult<&'static str> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, HEAD_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        let lists = self.store.list_shopping_lists(family.family.id).await?;
        if lists.is_empty() {
            return Err(OperationError::field(
                fields::SHOPPING_LISTS,
                shopping_lists_errors::ALREADY_EMPTY,
                ResponseStatus::Conflict,
            ));
        }

        self.store.delete_all_shopping_lists(family.family.id).await?;
        Ok(shopping_lists_successes::SHOPPING_LISTS_DELETED)
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}
