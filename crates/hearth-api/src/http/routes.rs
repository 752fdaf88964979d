//! HTTP route definitions and handlers.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tower_http::limit::RequestBodyLimitLayer;

use hearth_domain::messages::{default_errors, fields};
use hearth_domain::permission::ResponseStatus;
use hearth_domain::ItemId;
use hearth_server::handlers::{AssignHeadRequest, CreateShoppingListRequest, CreateTodoRequest};
use hearth_server::OperationError;
use hearth_storage::FamilyStore;

use super::state::AppState;

/// Default request body size limit (256KB).
/// Update payloads are small maps; anything larger is rejected up front.
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Private helper for the resource routes.
fn api_routes<S: FamilyStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route(
            "/api/todos",
            post(create_todo::<S>)
                .get(list_todos::<S>)
                .delete(delete_all_todos::<S>),
        )
        .route(
            "/api/todos/:todo_id",
            get(get_todo::<S>)
                .patch(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .route(
            "/api/shopping-lists",
            post(create_shopping_list::<S>)
                .get(list_shopping_lists::<S>)
                .delete(delete_all_shopping_lists::<S>),
        )
        .route(
            "/api/shopping-lists/:list_id",
            get(get_shopping_list::<S>)
                .patch(update_shopping_list::<S>)
                .delete(delete_shopping_list::<S>),
        )
        .route("/api/families/head", patch(assign_family_head::<S>))
}

/// Creates the HTTP router with all endpoints.
///
/// Applies the default body size limit to protect against oversized payloads.
pub fn create_router<S: FamilyStore>(state: AppState<S>) -> Router {
    create_router_with_body_limit(state, DEFAULT_BODY_LIMIT)
}

/// Creates the HTTP router with a custom body size limit.
pub fn create_router_with_body_limit<S: FamilyStore>(
    state: AppState<S>,
    body_limit: usize,
) -> Router {
    let shared_state = Arc::new(state);
    api_routes::<S>()
        .route("/health", get(health_check))
        .with_state(shared_state)
        .layer(RequestBodyLimitLayer::new(body_limit))
}

// ============================================================
// Error Handling
// ============================================================

/// Wire form of an [`OperationError`]: the field-to-message map under an
/// `errors` key, with the carried status as the HTTP status code.
#[derive(Debug)]
pub struct ApiError(pub OperationError);

impl From<OperationError> for ApiError {
    fn from(err: OperationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.0.status.code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "errors": self.0.errors }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Credential extracted from the `Authorization` header.
///
/// A leading `Bearer ` scheme prefix is tolerated and stripped. A missing or
/// empty header is treated the same as a credential that fails to decode:
/// the generic internal-error shape, with nothing about the cause exposed.
pub struct Credential(pub String);

#[async_trait]
impl<St> FromRequestParts<St> for Credential
where
    St: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|raw| raw.strip_prefix("Bearer ").unwrap_or(raw).trim())
            .filter(|raw| !raw.is_empty())
            .map(|raw| Credential(raw.to_string()))
            .ok_or_else(|| ApiError(OperationError::internal()))
    }
}

/// Custom JSON extractor that maps deserialization failures onto the
/// domain's own error vocabulary instead of Axum's default 422.
///
/// Preserves 413 Payload Too Large for body limit errors.
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<St, T> FromRequest<St> for JsonPayload<T>
where
    T: serde::de::DeserializeOwned,
    St: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonPayload(value)),
            Err(rejection) => {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return Err(rejection.into_response());
                }
                let error = OperationError::field(
                    fields::PAYLOAD,
                    default_errors::NOT_ALLOWED_VALUE,
                    ResponseStatus::BadRequest,
                );
                Err(ApiError(error).into_response())
            }
        }
    }
}

// ============================================================
// Health Check
// ============================================================

/// Basic health check - returns 200 if the server is running.
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ============================================================
// Todos
// ============================================================

async fn create_todo<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
    JsonPayload(body): JsonPayload<CreateTodoRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = state.todos.create(&credential, body).await?;
    Ok(Json(json!({ "message": message })))
}

async fn list_todos<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let todos = state.todos.list(&credential).await?;
    Ok(Json(json!({ "todos": todos })))
}

async fn get_todo<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(todo_id): Path<ItemId>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let todo = state.todos.get(&credential, todo_id).await?;
    Ok(Json(json!({ "todo": todo })))
}

async fn update_todo<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(todo_id): Path<ItemId>,
    Credential(credential): Credential,
    JsonPayload(payload): JsonPayload<Map<String, Value>>,
) -> ApiResult<impl IntoResponse> {
    let updated = state.todos.update(&credential, todo_id, payload).await?;
    Ok(Json(json!({ "updatedTodo": updated })))
}

async fn delete_todo<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(todo_id): Path<ItemId>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.todos.delete(&credential, todo_id).await?;
    Ok(Json(json!({ "deletedTodo": deleted })))
}

async fn delete_all_todos<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let message = state.todos.delete_all(&credential).await?;
    Ok(Json(json!({ "message": message })))
}

// ============================================================
// Shopping Lists
// ============================================================

async fn create_shopping_list<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
    JsonPayload(body): JsonPayload<CreateShoppingListRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = state.shopping_lists.create(&credential, body).await?;
    Ok(Json(json!({ "message": message })))
}

async fn list_shopping_lists<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let lists = state.shopping_lists.list(&credential).await?;
    Ok(Json(json!({ "shoppingLists": lists })))
}

async fn get_shopping_list<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(list_id): Path<ItemId>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let list = state.shopping_lists.get(&credential, list_id).await?;
    Ok(Json(json!({ "shoppingList": list })))
}

async fn update_shopping_list<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(list_id): Path<ItemId>,
    Credential(credential): Credential,
    JsonPayload(payload): JsonPayload<Map<String, Value>>,
) -> ApiResult<impl IntoResponse> {
    let updated = state
        .shopping_lists
        .update(&credential, list_id, payload)
        .await?;
    Ok(Json(json!({ "updatedShoppingList": updated })))
}

async fn delete_shopping_list<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(list_id): Path<ItemId>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.shopping_lists.delete(&credential, list_id).await?;
    Ok(Json(json!({ "deletedShoppingList": deleted })))
}

async fn delete_all_shopping_lists<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
) -> ApiResult<impl IntoResponse> {
    let message = state.shopping_lists.delete_all(&credential).await?;
    Ok(Json(json!({ "message": message })))
}

// ============================================================
// Family Administration
// ============================================================

async fn assign_family_head<S: FamilyStore>(
    State(state): State<Arc<AppState<S>>>,
    Credential(credential): Credential,
    JsonPayload(body): JsonPayload<AssignHeadRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = state
        .families
        .assign_head(&credential, body.user_to_assign_id)
        .await?;
    Ok(Json(json!({ "message": message })))
}
