//! Family orchestrator: head transfer.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument};

use hearth_domain::messages::account_successes;
use hearth_domain::transfer::{validate_assigning_user, validate_target_user};
use hearth_domain::{TokenService, UserId};
use hearth_storage::FamilyStore;

use super::{authorize, require_family, OperationError, OperationResult};

/// Request body for assigning a new family head.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignHeadRequest {
    #[serde(default)]
    pub user_to_assign_id: Option<UserId>,
}

/// Orchestrates family administration.
pub struct FamilyHandler<S: FamilyStore> {
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<S: FamilyStore> FamilyHandler<S> {
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Moves headship from the caller to another family member.
    ///
    /// The assigning user is validated first (target provided, no
    /// self-assignment, caller is head, caller has a family), then the
    /// target against the member snapshot (membership, minimum family
    /// size). Only after both pass does the storage collaborator flip the
    /// head reference, as one atomic write.
    #[instrument(skip(self, credential))]
    pub async fn assign_head(
        &self,
        credential: &str,
        target_user_id: Option<UserId>,
    ) -> OperationResult<&'static str> {
        let snapshot = authorize(&*self.store, &self.tokens, credential, &[]).await?;

        let result = validate_assigning_user(&snapshot.user, target_user_id);
        if !result.is_valid {
            return Err(result.into());
        }
        // validate_assigning_user guarantees the target id and family exist.
        let target_user_id = target_user_id.ok_or_else(OperationError::internal)?;
        let family = require_family(&snapshot)?;

        let result = validate_target_user(target_user_id, &family.members);
        if !result.is_valid {
            return Err(result.into());
        }

        self.store
            .transfer_family_head(family.family.id, target_user_id)
            .await?;

        info!(
            family_id = family.family.id,
            from = snapshot.user.id,
            to = target_user_id,
            "family head transferred"
        );
        Ok(account_successes::FAMILY_HEAD_ASSIGNED)
    }
}
