//! Resource orchestrators.
//!
//! Handlers compose the domain core with the storage collaborator. Expected
//! validation failures come back as an [`OperationError`] carrying a status
//! and a field-to-message map; unexpected failures (credential decode,
//! storage faults) are caught here, logged, and collapsed into one generic
//! internal-error shape so the underlying cause never leaks to callers.

pub mod family;
pub mod shopping_list;
pub mod todo;

use std::collections::BTreeMap;

use tracing::error;

use hearth_domain::messages::{fields, internal_errors};
use hearth_domain::permission::{evaluate, Condition, PermissionResult, ResponseStatus};
use hearth_domain::{DomainError, TokenService};
use hearth_storage::{FamilySnapshot, FamilyStore, StorageError, UserSnapshot};

pub use family::{AssignHeadRequest, FamilyHandler};
pub use shopping_list::{CreateShoppingListRequest, ShoppingListHandler, ShoppingListItemInput};
pub use todo::{CreateTodoRequest, TodoHandler};

/// A structured operation failure: status plus field-to-message error map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    pub status: ResponseStatus,
    pub errors: BTreeMap<String, String>,
}

impl OperationError {
    /// A failure with a single field error.
    pub fn field(field: &str, message: &str, status: ResponseStatus) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), message.to_string());
        Self { status, errors }
    }

    /// The generic internal-error shape.
    pub fn internal() -> Self {
        Self::field(
            fields::ERROR,
            internal_errors::STH_WRONG,
            ResponseStatus::InternalError,
        )
    }
}

impl From<PermissionResult> for OperationError {
    fn from(result: PermissionResult) -> Self {
        Self {
            status: result.status,
            errors: result.errors,
        }
    }
}

impl From<StorageError> for OperationError {
    fn from(err: StorageError) -> Self {
        error!("storage operation failed: {err}");
        Self::internal()
    }
}

impl From<DomainError> for OperationError {
    fn from(err: DomainError) -> Self {
        // Credential decode failures included: surfaced as a generic
        // internal error, never distinguished for the caller.
        error!("domain operation failed: {err}");
        Self::internal()
    }
}

/// Result type for orchestrated operations.
pub type OperationResult<T> = Result<T, OperationError>;

/// Shared front of every pipeline: verify the credential, resolve the
/// user-with-family snapshot, and evaluate the operation's required
/// conditions.
///
/// A credential that does not decode is an internal error; a credential
/// that decodes but matches no user fails permission evaluation with the
/// usual `user -> user-has-no-permissions` entry.
pub(crate) async fn authorize<S: FamilyStore>(
    store: &S,
    tokens: &TokenService,
    credential: &str,
    required: &[Condition],
) -> OperationResult<UserSnapshot> {
    let identity = tokens.verify(credential)?;
    let snapshot = store.resolve_user(identity.id).await?;

    let result = evaluate(snapshot.as_ref().map(|s| &s.user), required);
    if !result.is_valid {
        return Err(result.into());
    }

    // Evaluation rejects unresolved users before this point.
    snapshot.ok_or_else(OperationError::internal)
}

/// Extracts the family snapshot after a `HasFamily`-gated evaluation.
pub(crate) fn require_family(snapshot: &UserSnapshot) -> OperationResult<&FamilySnapshot> {
    snapshot.family.as_ref().ok_or_else(OperationError::internal)
}
