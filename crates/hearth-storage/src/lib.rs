//! hearth-storage: Storage abstraction for family-scoped data
//!
//! This crate defines the repository collaborator the orchestrators depend
//! on:
//! - `FamilyStore` trait: identity resolution plus family-scoped CRUD for
//!   todos and shopping lists, and the atomic family-head transfer
//! - `MemoryFamilyStore`: thread-safe in-memory implementation for tests
//!   and development
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              hearth-storage                  │
//! ├─────────────────────────────────────────────┤
//! │  traits.rs   - FamilyStore abstraction      │
//! │  memory.rs   - In-memory implementation     │
//! │  error.rs    - Storage error types          │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryFamilyStore;
pub use traits::{FamilySnapshot, FamilyStore, UserSnapshot};
