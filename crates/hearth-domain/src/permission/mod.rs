//! Table-driven permission evaluation.
//!
//! Every guarded operation names the conditions its caller must satisfy; the
//! evaluator checks them against an immutable user snapshot and returns a
//! [`PermissionResult`] with one entry per failing condition. Adding a new
//! condition is a single entry in [`CONDITION_TABLE`].

use std::collections::BTreeMap;

use crate::messages::{fields, user_errors};
use crate::model::User;

/// Response status vocabulary surfaced to the transport layer.
///
/// Permission failures intentionally use `BadRequest` rather than 401/403;
/// existing clients depend on that mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    BadRequest,
    NotFound,
    Conflict,
    InternalError,
}

impl ResponseStatus {
    /// The HTTP-style numeric code for this status.
    pub fn code(self) -> u16 {
        match self {
            ResponseStatus::Success => 200,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::NotFound => 404,
            ResponseStatus::Conflict => 409,
            ResponseStatus::InternalError => 500,
        }
    }
}

/// Outcome of a validation pass.
///
/// Produced fresh per evaluation and never persisted. `errors` maps a field
/// name to a message code; iteration order is stable so responses are
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
    pub status: ResponseStatus,
}

impl PermissionResult {
    /// A passing result with an empty error map.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            status: ResponseStatus::Success,
        }
    }

    /// A failing result with a single field error.
    pub fn fail(field: &str, message: &str, status: ResponseStatus) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), message.to_string());
        Self {
            is_valid: false,
            errors,
            status,
        }
    }
}

/// A named predicate over a user snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    IsVerified,
    HasFamily,
    IsFamilyHead,
}

/// All conditions in their fixed evaluation order.
const CONDITION_TABLE: &[(Condition, fn(&User) -> bool)] = &[
    (Condition::IsVerified, |user| user.is_verified),
    (Condition::HasFamily, |user| user.has_family()),
    (Condition::IsFamilyHead, |user| user.is_family_head),
];

/// Evaluates the required conditions against a resolved user.
///
/// An unresolved user (`None`) short-circuits to a single
/// `user -> user-has-no-permissions` failure. Otherwise every required
/// condition is checked in table order and all failures are collected into
/// one result rather than stopping at the first.
pub fn evaluate(user: Option<&User>, required: &[Condition]) -> PermissionResult {
    let Some(user) = user else {
        return PermissionResult::fail(
            fields::USER,
            user_errors::HAS_NO_PERMISSIONS,
            ResponseStatus::BadRequest,
        );
    };

    let mut errors = BTreeMap::new();
    for (condition, predicate) in CONDITION_TABLE {
        if required.contains(condition) && !predicate(user) {
            errors.insert(
                fields::USER.to_string(),
                user_errors::HAS_NO_PERMISSIONS.to_string(),
            );
        }
    }

    if errors.is_empty() {
        PermissionResult::ok()
    } else {
        PermissionResult {
            is_valid: false,
            errors,
            status: ResponseStatus::BadRequest,
        }
    }
}
