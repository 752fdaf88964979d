//! hearth-domain: Core authorization and relationship-integrity logic
//!
//! This crate contains the pure decision-making core of the Hearth backend:
//! - Token service (signed identity credentials)
//! - Permission evaluator (table-driven condition checks)
//! - Family-head transfer validator
//! - Update-payload whitelist checker
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               hearth-domain                  │
//! ├─────────────────────────────────────────────┤
//! │  model/      - User/Family/Todo entities    │
//! │  token.rs    - Credential issue/verify      │
//! │  permission/ - Condition evaluation         │
//! │  transfer.rs - Head-transfer validation     │
//! │  payload.rs  - Update payload whitelisting  │
//! │  messages.rs - Error/success vocabulary     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! mutable state, safe to evaluate concurrently and to retry.

pub mod error;
pub mod messages;
pub mod model;
pub mod payload;
pub mod permission;
pub mod token;
pub mod transfer;

// Re-export commonly used types at the crate root
pub use error::{DomainError, DomainResult};
pub use model::{Family, FamilyId, ItemId, ShoppingList, Todo, User, UserId};
pub use permission::{evaluate, Condition, PermissionResult, ResponseStatus};
pub use token::{TokenIdentity, TokenService};
