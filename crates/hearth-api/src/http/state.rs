//! Application state for HTTP handlers.

use std::sync::Arc;

use hearth_domain::TokenService;
use hearth_server::handlers::{FamilyHandler, ShoppingListHandler, TodoHandler};
use hearth_storage::FamilyStore;

/// Application state shared across all HTTP handlers.
///
/// One orchestrator per resource, all backed by the same storage and token
/// service. The state is wrapped in an `Arc` by the router, so the handlers
/// themselves hold `Arc`s internally and stay cheap to share.
///
/// # Type Parameters
///
/// * `S` - The storage backend implementing `FamilyStore`
pub struct AppState<S: FamilyStore> {
    /// Todo orchestrator.
    pub todos: TodoHandler<S>,
    /// Shopping-list orchestrator.
    pub shopping_lists: ShoppingListHandler<S>,
    /// Family administration orchestrator.
    pub families: FamilyHandler<S>,
}

impl<S: FamilyStore> AppState<S> {
    /// Creates the application state from a storage backend and the
    /// credential signing secret.
    pub fn new(store: Arc<S>, secret: &[u8]) -> Self {
        let tokens = Arc::new(TokenService::new(secret));

        Self {
            todos: TodoHandler::new(Arc::clone(&store), Arc::clone(&tokens)),
            shopping_lists: ShoppingListHandler::new(Arc::clone(&store), Arc::clone(&tokens)),
            families: FamilyHandler::new(store, tokens),
        }
    }
}
