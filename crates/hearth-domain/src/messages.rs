//! Error and success message vocabulary.
//!
//! Responses carry a field-to-message map; these are the message codes the
//! transport layer serializes verbatim. Clients match on the codes, so they
//! are part of the API contract and must stay stable.

/// Field names used as keys in error maps.
pub mod fields {
    pub const USER: &str = "user";
    pub const EMAIL: &str = "email";
    pub const FAMILY: &str = "family";
    pub const USER_TO_ASSIGN_ID: &str = "userToAssignId";
    pub const PAYLOAD: &str = "payload";
    pub const TITLE: &str = "title";
    pub const TODO: &str = "todo";
    pub const TODOS: &str = "todos";
    pub const SHOPPING_LIST: &str = "shoppingList";
    pub const SHOPPING_LISTS: &str = "shoppingLists";
    pub const ERROR: &str = "error";
}

pub mod default_errors {
    pub const IS_REQUIRED: &str = "is-required";
    pub const NOT_FOUND: &str = "not-found";
    pub const NOT_ALLOWED_VALUE: &str = "not-allowed-value";
}

pub mod user_errors {
    pub const HAS_NO_PERMISSIONS: &str = "user-has-no-permissions";
}

pub mod email_errors {
    pub const ASSIGN_ITSELF: &str = "account-assign-itself";
    pub const IS_NO_FAMILY_HEAD: &str = "account-is-no-family-head";
    pub const HAS_NO_FAMILY: &str = "account-has-no-family";
}

pub mod family_errors {
    pub const NO_SUCH_USER: &str = "family-no-such-user";
    pub const TOO_SMALL: &str = "family-too-small";
}

pub mod todos_errors {
    pub const ALREADY_EMPTY: &str = "todos-already-empty";
}

pub mod shopping_lists_errors {
    pub const ALREADY_EMPTY: &str = "shopping-lists-already-empty";
}

pub mod internal_errors {
    pub const STH_WRONG: &str = "something-went-wrong";
}

pub mod account_successes {
    pub const FAMILY_HEAD_ASSIGNED: &str = "account-family-head-assigned";
}

pub mod todos_successes {
    pub const TODO_CREATED: &str = "todos-created";
    pub const TODOS_DELETED: &str = "todos-all-deleted";
}

pub mod shopping_lists_successes {
    pub const SHOPPING_LIST_CREATED: &str = "shopping-list-created";
    pub const SHOPPING_LISTS_DELETED: &str = "shopping-lists-all-deleted";
}
