//! Todo orchestrator.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use hearth_domain::messages::{
    default_errors, fields, todos_errors, todos_successes,
};
use hearth_domain::payload::{check_is_proper_update_payload, ALLOWED_UPDATE_TODO_KEYS};
use hearth_domain::permission::{Condition, ResponseStatus};
use hearth_domain::{ItemId, Todo, TokenService};
use hearth_storage::FamilyStore;

use super::{authorize, require_family, OperationError, OperationResult};

/// Request body for creating a todo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Orchestrates todo operations: authorization, payload gating, and
/// delegation to the storage collaborator.
pub struct TodoHandler<S: FamilyStore> {
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

/// Conditions shared by every member-level todo operation.
const MEMBER_CONDITIONS: &[Condition] = &[Condition::IsVerified, Condition::HasFamily];

/// Conditions for the family-wide delete, which is head-only.
const HEAD_CONDITIONS: &[Condition] = &[
    Condition::IsVerified,
    Condition::HasFamily,
    Condition::IsFamilyHead,
];

impl<S: FamilyStore> TodoHandler<S> {
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Creates a todo for the caller's family.
    #[instrument(skip(self, credential, request))]
    pub async fn create(
        &self,
        credential: &str,
        request: CreateTodoRequest,
    ) -> OperationResult<&'static str> {
        if request.title.trim().is_empty() {
            return Err(OperationError::field(
                fields::TITLE,
                default_errors::IS_REQUIRED,
                ResponseStatus::BadRequest,
            ));
        }

        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        let now = chrono::Utc::now();
        let todo = Todo {
            id: 0,
            family_id: family.family.id,
            title: request.title,
            // Empty optional fields are treated as omitted.
            description: request.description.filter(|s| !s.trim().is_empty()),
            deadline: request.deadline.filter(|s| !s.trim().is_empty()),
            is_done: false,
            author_id: snapshot.user.id,
            executor_id: None,
            updater_id: None,
            created_at: now,
            updated_at: now,
        };

        self.store.save_todo(todo).await?;
        Ok(todos_successes::TODO_CREATED)
    }

    /// Lists the caller's family todos.
    pub async fn list(&self, credential: &str) -> OperationResult<Vec<Todo>> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        Ok(self.store.list_todos(family.family.id).await?)
    }

    /// Fetches one todo within the caller's family scope.
    pub async fn get(&self, credential: &str, todo_id: ItemId) -> OperationResult<Todo> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        self.store
            .find_todo(family.family.id, todo_id)
            .await?
            .ok_or_else(|| {
                OperationError::field(
                    fields::TODO,
                    default_errors::NOT_FOUND,
                    ResponseStatus::NotFound,
                )
            })
    }

    /// Applies a whitelisted update payload to a todo.
    ///
    /// The payload gate runs before any resolution work so over-posted
    /// requests are rejected without touching storage. The caller is stamped
    /// as updater; the executor is set exactly when the payload marks the
    /// todo done, and cleared otherwise.
    #[instrument(skip(self, credential, payload))]
    pub async fn update(
        &self,
        credential: &str,
        todo_id: ItemId,
        payload: Map<String, Value>,
    ) -> OperationResult<Todo> {
        if !check_is_proper_update_payload(&payload, ALLOWED_UPDATE_TODO_KEYS) {
            return Err(OperationError::field(
                fields::PAYLOAD,
                default_errors::NOT_ALLOWED_VALUE,
                ResponseStatus::BadRequest,
            ));
        }

        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        let mut todo = self
            .store
            .find_todo(family.family.id, todo_id)
            .await?
            .ok_or_else(|| {
                OperationError::field(
                    fields::TODO,
                    default_errors::NOT_FOUND,
                    ResponseStatus::NotFound,
                )
            })?;

        if let Some(title) = payload.get("title").and_then(Value::as_str) {
            todo.title = title.to_string();
        }
        if let Some(description) = payload.get("description").and_then(Value::as_str) {
            todo.description = Some(description.to_string());
        }
        if let Some(deadline) = payload.get("deadline").and_then(Value::as_str) {
            todo.deadline = Some(deadline.to_string());
        }

        let marked_done = payload.get("isDone").and_then(Value::as_bool);
        if let Some(done) = marked_done {
            todo.is_done = done;
        }

        todo.updater_id = Some(snapshot.user.id);
        todo.executor_id = if marked_done == Some(true) {
            Some(snapshot.user.id)
        } else {
            None
        };

        Ok(self.store.save_todo(todo).await?)
    }

    /// Removes one todo within the caller's family scope.
    pub async fn delete(&self, credential: &str, todo_id: ItemId) -> OperationResult<Todo> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, MEMBER_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        if self
            .store
            .find_todo(family.family.id, todo_id)
            .await?
            .is_none()
        {
            return Err(OperationError::field(
                fields::TODO,
                default_errors::NOT_FOUND,
                ResponseStatus::NotFound,
            ));
        }

        Ok(self.store.remove_todo(family.family.id, todo_id).await?)
    }

    /// Deletes every todo the family owns. Head-only; conflicts when the
    /// collection is already empty.
    #[instrument(skip(self, credential))]
    pub async fn delete_all(&self, credential: &str) -> OperationResult<&'static str> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, HEAD_CONDITIONS).await?;
        let family = require_family(&snapshot)?;

        let todos = self.store.list_todos(family.family.id).await?;
        if todos.is_empty() {
            return Err(OperationError::field(
                fields::TODOS,
                todos_errors::ALREADY_EMPTY,
                ResponseStatus::Conflict,
            ));
        }

        self.store.delete_all_todos(family.family.id).await?;
        Ok(todos_successes::TODOS_DELETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_storage::MemoryFamilyStore;
    use serde_json::json;

    struct Fixture {
        handler: TodoHandler<MemoryFamilyStore>,
        store: Arc<MemoryFamilyStore>,
        tokens: Arc<TokenService>,
        head_credential: String,
        member_credential: String,
        family_id: i64,
    }

    fn fixture() -> Fixture {
        let store = MemoryFamilyStore::new_shared();
        let tokens = Arc::new(TokenService::new(b"test-secret"));

        let family_id = store.add_family("smiths");
        let head = store.add_user("ann@example.com", "Ann", "Smith", true, Some(family_id));
        let member = store.add_user("bob@example.com", "Bob", "Smith", true, Some(family_id));

        let head_credential = tokens.issue(head, "ann@example.com").unwrap();
        let member_credential = tokens.issue(member, "bob@example.com").unwrap();

        Fixture {
            handler: TodoHandler::new(Arc::clone(&store), Arc::clone(&tokens)),
            store,
            tokens,
            head_credential,
            member_credential,
            family_id,
        }
    }

    fn create_request(title: &str) -> CreateTodoRequest {
        CreateTodoRequest {
            title: title.to_string(),
            description: None,
            deadline: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let f = fixture();
        let err = f
            .handler
            .create(&f.head_credential, create_request("  "))
            .await
            .unwrap_err();
        assert_eq!(err.status, ResponseStatus::BadRequest);
        assert_eq!(err.errors.get("title").map(String::as_str), Some("is-required"));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let f = fixture();
        let message = f
            .handler
            .create(&f.member_credential, create_request("dishes"))
            .await
            .unwrap();
        assert_eq!(message, "todos-created");

        let todos = f.handler.list(&f.head_credential).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "dishes");
        assert!(!todos[0].is_done);
    }

    #[tokio::test]
    async fn test_unverified_user_is_rejected() {
        let f = fixture();
        let unverified = f
            .store
            .add_user("kid@example.com", "Kid", "Smith", false, Some(f.family_id));
        let credential = f.tokens.issue(unverified, "kid@example.com").unwrap();

        let err = f
            .handler
            .create(&credential, create_request("dishes"))
            .await
            .unwrap_err();
        assert_eq!(err.status, ResponseStatus::BadRequest);
        assert_eq!(
            err.errors.get("user").map(String::as_str),
            Some("user-has-no-permissions")
        );
    }

    #[tokio::test]
    async fn test_user_without_family_is_rejected() {
        let f = fixture();
        let solo = f.store.add_user("solo@example.com", "Sol", "Lone", true, None);
        let credential = f.tokens.issue(solo, "solo@example.com").unwrap();

        let err = f.handler.list(&credential).await.unwrap_err();
        assert_eq!(err.status, ResponseStatus::BadRequest);
    }

    #[tokio::test]
    async fn test_unresolvable_credential_is_rejected() {
        let f = fixture();
        // Valid signature, but no matching user record.
        let credential = f.tokens.issue(999, "ghost@example.com").unwrap();

        let err = f.handler.list(&credential).await.unwrap_err();
        assert_eq!(err.status, ResponseStatus::BadRequest);
        assert_eq!(
            err.errors.get("user").map(String::as_str),
            Some("user-has-no-permissions")
        );
    }

    #[tokio::test]
    async fn test_tampered_credential_is_internal_error() {
        let f = fixture();
        let err = f.handler.list("garbage-token").await.unwrap_err();
        assert_eq!(err.status, ResponseStatus::InternalError);
        assert_eq!(
            err.errors.get("error").map(String::as_str),
            Some("something-went-wrong")
        );
    }

    #[tokio::test]
    async fn test_get_missing_todo_is_not_found() {
        let f = fixture();
        let err = f.handler.get(&f.head_credential, 42).await.unwrap_err();
        assert_eq!(err.status, ResponseStatus::NotFound);
        assert_eq!(err.errors.get("todo").map(String::as_str), Some("not-found"));
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_keys() {
        let f = fixture();
        let payload = json!({"title": "x", "author": "evil"})
            .as_object()
            .cloned()
            .unwrap();

        let err = f
            .handler
            .update(&f.head_credential, 1, payload)
            .await
            .unwrap_err();
        assert_eq!(err.status, ResponseStatus::BadRequest);
        assert_eq!(
            err.errors.get("payload").map(String::as_str),
            Some("not-allowed-value")
        );
    }

    #[tokio::test]
    async fn test_update_stamps_updater_and_executor() {
        let f = fixture();
        f.handler
            .create(&f.head_credential, create_request("dishes"))
            .await
            .unwrap();
        let todo = f.handler.list(&f.head_credential).await.unwrap().remove(0);

        let payload = json!({"isDone": true}).as_object().cloned().unwrap();
        let updated = f
            .handler
            .update(&f.member_credential, todo.id, payload)
            .await
            .unwrap();

        assert!(updated.is_done);
        // Bob (the member) completed and last touched it.
        assert_eq!(updated.executor_id, updated.updater_id);
        assert!(updated.executor_id.is_some());

        // Reopening clears the executor but keeps the updater stamp.
        let payload = json!({"isDone": false}).as_object().cloned().unwrap();
        let reopened = f
            .handler
            .update(&f.head_credential, todo.id, payload)
            .await
            .unwrap();
        assert!(!reopened.is_done);
        assert!(reopened.executor_id.is_none());
        assert!(reopened.updater_id.is_some());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_todo() {
        let f = fixture();
        f.handler
            .create(&f.head_credential, create_request("dishes"))
            .await
            .unwrap();
        let todo = f.handler.list(&f.head_credential).await.unwrap().remove(0);

        let removed = f.handler.delete(&f.head_credential, todo.id).await.unwrap();
        assert_eq!(removed.id, todo.id);
        assert!(f.handler.list(&f.head_credential).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_is_head_only() {
        let f = fixture();
        f.handler
            .create(&f.member_credential, create_request("dishes"))
            .await
            .unwrap();

        let err = f.handler.delete_all(&f.member_credential).await.unwrap_err();
        assert_eq!(err.status, ResponseStatus::BadRequest);

        let message = f.handler.delete_all(&f.head_credential).await.unwrap();
        assert_eq!(message, "todos-all-deleted");
    }

    #[tokio::test]
    async fn test_delete_all_conflicts_when_empty() {
        let f = fixture();
        let err = f.handler.delete_all(&f.head_credential).await.unwrap_err();
        assert_eq!(err.status, ResponseStatus::Conflict);
        assert_eq!(
            err.errors.get("todos").map(String::as_str),
            Some("todos-already-empty")
        );
    }
}
