//! Content HTTP Routes
//!
//! CRUD over the content document's sections and items. Every write runs a
//! load-mutate-save sequence under a single process-wide mutex: concurrent
//! writes can no longer interleave mid-save, though two writers touching
//! different sections still race at the document level (accepted for a
//! single-admin site).
//!
//! These routes perform no authorization; the `/auth` surface is the gate
//! and deployments are expected to front mutating calls with it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::content::{ContentDocument, ContentError, ContentResult, ContentStore};

use super::response::ApiResponse;

// ==================
// Shared State
// ==================

/// Content state shared across handlers
pub struct ContentState {
    store: ContentStore,
    write_lock: Mutex<()>,
}

impl ContentState {
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying store (reads take no lock; they load a fresh snapshot)
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Run a mutation under the write lock: load, mutate, save
    ///
    /// If the mutation or the save fails, nothing is persisted; the next
    /// request reloads the document from disk, so no rollback is needed.
    pub async fn mutate<T>(
        &self,
        mutate: impl FnOnce(&mut ContentDocument) -> ContentResult<T>,
    ) -> ContentResult<T> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load();
        let result = mutate(&mut doc)?;
        self.store.save(&doc)?;
        Ok(result)
    }
}

// ==================
// Router
// ==================

/// Build the content router
pub fn content_routes(state: Arc<ContentState>) -> Router {
    Router::new()
        .route("/content", get(get_all))
        .route("/content/:section", get(get_section).post(upsert_section))
        .route("/content/:section/item", post(create_item))
        .route(
            "/content/:section/item/:id",
            put(update_item).delete(delete_item),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// GET /content - full document
async fn get_all(State(state): State<Arc<ContentState>>) -> Json<Value> {
    Json(state.store().load().to_value())
}

/// GET /content/:section - one section
async fn get_section(
    State(state): State<Arc<ContentState>>,
    Path(section): Path<String>,
) -> Result<Json<Value>, ContentError> {
    let doc = state.store().load();
    let value = doc.section(&section)?;
    Ok(Json(value.clone()))
}

/// POST /content/:section - create or merge a section
async fn upsert_section(
    State(state): State<Arc<ContentState>>,
    Path(section): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<Value>>, ContentError> {
    let result = state
        .mutate(|doc| doc.upsert_section(&section, body))
        .await?;
    Ok(Json(ApiResponse::ok("Section updated successfully", result)))
}

/// POST /content/:section/item - append a new item
async fn create_item(
    State(state): State<Arc<ContentState>>,
    Path(section): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<Value>>, ContentError> {
    let item = state.mutate(|doc| doc.create_item(&section, body)).await?;
    Ok(Json(ApiResponse::ok("Item created successfully", item)))
}

/// PUT /content/:section/item/:id - patch an item in place
async fn update_item(
    State(state): State<Arc<ContentState>>,
    Path((section, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Result<Json<ApiResponse<Value>>, ContentError> {
    let item = state
        .mutate(|doc| doc.update_item(&section, id, body))
        .await?;
    Ok(Json(ApiResponse::ok("Item updated successfully", item)))
}

/// DELETE /content/:section/item/:id - remove an item
async fn delete_item(
    State(state): State<Arc<ContentState>>,
    Path((section, id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<Value>>, ContentError> {
    state.mutate(|doc| doc.delete_item(&section, id)).await?;
    Ok(Json(ApiResponse::message_only("Item deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn temp_state(temp: &TempDir) -> Arc<ContentState> {
        Arc::new(ContentState::new(ContentStore::new(
            temp.path().join("content.json"),
        )))
    }

    #[tokio::test]
    async fn test_mutate_persists() {
        let temp = TempDir::new().unwrap();
        let state = temp_state(&temp);

        state
            .mutate(|doc| doc.upsert_section("hero", json!({"title": "Hi"})))
            .await
            .unwrap();

        let reloaded = state.store().load();
        assert_eq!(reloaded.section("hero").unwrap()["title"], "Hi");
    }

    #[tokio::test]
    async fn test_failed_mutation_not_persisted() {
        let temp = TempDir::new().unwrap();
        let state = temp_state(&temp);

        let result = state
            .mutate(|doc| doc.delete_item("missing", 1))
            .await;
        assert!(result.is_err());
        assert!(state.store().load().is_empty());
    }

    #[test]
    fn test_router_builds() {
        let temp = TempDir::new().unwrap();
        let _router = content_routes(temp_state(&temp));
    }
}
