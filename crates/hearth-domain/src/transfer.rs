//! Family-head transfer validation.
//!
//! Headship moves in two validation steps applied in order: the assigning
//! user is checked first, then the transfer target against the family member
//! snapshot. Both steps return structured results; the atomic flag flip
//! itself is the storage layer's job and happens only after both pass.

use crate::messages::{default_errors, email_errors, family_errors, fields};
use crate::model::{User, UserId};
use crate::permission::{PermissionResult, ResponseStatus};

/// Validates the user attempting to hand off headship.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. a target id must be provided,
/// 2. the head may not reassign headship to themselves,
/// 3. the assigning user must currently be the family head,
/// 4. the assigning user must belong to a family.
pub fn validate_assigning_user(
    assigning_user: &User,
    target_user_id: Option<UserId>,
) -> PermissionResult {
    let Some(target_user_id) = target_user_id else {
        return PermissionResult::fail(
            fields::USER_TO_ASSIGN_ID,
            default_errors::IS_REQUIRED,
            ResponseStatus::BadRequest,
        );
    };

    if assigning_user.id == target_user_id {
        return PermissionResult::fail(
            fields::EMAIL,
            email_errors::ASSIGN_ITSELF,
            ResponseStatus::BadRequest,
        );
    }

    if !assigning_user.is_family_head {
        return PermissionResult::fail(
            fields::EMAIL,
            email_errors::IS_NO_FAMILY_HEAD,
            ResponseStatus::BadRequest,
        );
    }

    if !assigning_user.has_family() {
        return PermissionResult::fail(
            fields::EMAIL,
            email_errors::HAS_NO_FAMILY,
            ResponseStatus::BadRequest,
        );
    }

    PermissionResult::ok()
}

/// Validates the transfer target against the family member snapshot.
///
/// The target must be an existing member, and a family of one cannot
/// transfer headship at all.
pub fn validate_target_user(target_user_id: UserId, family_members: &[User]) -> PermissionResult {
    if !family_members.iter().any(|member| member.id == target_user_id) {
        return PermissionResult::fail(
            fields::FAMILY,
            family_errors::NO_SUCH_USER,
            ResponseStatus::BadRequest,
        );
    }

    if family_members.len() < 2 {
        return PermissionResult::fail(
            fields::FAMILY,
            family_errors::TOO_SMALL,
            ResponseStatus::BadRequest,
        );
    }

    PermissionResult::ok()
}
