//! HTTP REST API endpoints.
//!
//! All resource routes are private: the caller's signed credential travels
//! in the `Authorization` header and every handler runs the shared
//! verify-resolve-evaluate pipeline before touching storage.
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/todos` | POST | Create a todo |
//! | `/api/todos` | GET | List the family's todos |
//! | `/api/todos` | DELETE | Delete all todos (head only) |
//! | `/api/todos/{todo_id}` | GET | Fetch one todo |
//! | `/api/todos/{todo_id}` | PATCH | Update a todo |
//! | `/api/todos/{todo_id}` | DELETE | Delete a todo |
//! | `/api/shopping-lists` | POST/GET/DELETE | Same shape as todos |
//! | `/api/shopping-lists/{list_id}` | GET/PATCH/DELETE | Same shape as todos |
//! | `/api/families/head` | PATCH | Transfer family headship |
//! | `/health` | GET | Liveness check |

pub mod routes;
pub mod state;

pub use routes::{create_router, create_router_with_body_limit, DEFAULT_BODY_LIMIT};
pub use state::AppState;

#[cfg(test)]
mod tests;
