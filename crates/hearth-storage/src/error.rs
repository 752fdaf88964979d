//! Storage error types.

use hearth_domain::{FamilyId, ItemId, UserId};
use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No user record with the given id.
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: UserId },

    /// No family record with the given id.
    #[error("family not found: {family_id}")]
    FamilyNotFound { family_id: FamilyId },

    /// No item with the given id within the family scope.
    #[error("item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },

    /// The head-transfer target is not a member of the family.
    #[error("user {user_id} is not a member of family {family_id}")]
    NotAFamilyMember { family_id: FamilyId, user_id: UserId },

    /// Unexpected backend failure.
    #[error("storage operation failed: {message}")]
    OperationFailed { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
