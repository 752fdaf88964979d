//! hearth-server: Resource orchestration and configuration
//!
//! This crate contains the business-logic layer:
//! - Todo orchestrator (create/read/update/delete, family-wide delete)
//! - Shopping-list orchestrator (same surface)
//! - Family orchestrator (head transfer)
//! - Configuration management
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               hearth-server                  │
//! ├─────────────────────────────────────────────┤
//! │  config.rs   - Configuration management     │
//! │  handlers/   - Resource orchestrators       │
//! │    todo.rs          - Todo operations       │
//! │    shopping_list.rs - Shopping lists        │
//! │    family.rs        - Head transfer         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Each mutating operation follows a fixed pipeline: verify the credential,
//! resolve the user-with-family snapshot, evaluate the operation's required
//! conditions, whitelist the payload for updates, then delegate the mutation
//! to the storage collaborator.

pub mod config;
pub mod handlers;

// Re-exports for convenience
pub use config::{ConfigLoadError, ServerConfig};
pub use handlers::{OperationError, OperationResult};
