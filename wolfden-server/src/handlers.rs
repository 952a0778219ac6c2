use crate::error::{ServerError, ServerResult};
use crate::models::{body_to_document, StatusResponse};
use crate::state::AppState;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;
use wolfden_core::{Collection, ConfigDocument};

/// Handler for `GET /api/config`
/// Returns the stored config, or the built-in defaults when there is none.
#[axum::debug_handler]
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigDocument> {
    debug!("Received request for config");
    Json(state.store.load_config().await)
}

/// Handler for `POST /api/config`
/// Copies `apiBase`, `apiKey`, `rolesSetup` and `modelsSetup` from the body
/// into the stored config. The port can only be changed by editing the file.
#[axum::debug_handler]
pub async fn update_config(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<StatusResponse>> {
    let patch = body_to_document(&body);
    debug!(bytes = body.len(), "Received config update");
    state.store.update_config(&patch).await?;
    Ok(Json(StatusResponse::ok()))
}

/// Handler for `GET /api/default_prompt`
#[axum::debug_handler]
pub async fn get_default_prompt(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    debug!("Received request for default prompt");
    Ok(Json(state.store.default_prompt().await?))
}

/// Handler for `GET /api/saves`
pub async fn list_saves(State(state): State<AppState>) -> ServerResult<Json<Vec<String>>> {
    list_documents(&state, Collection::Saves).await
}

/// Handler for `GET /api/saves/*name`
pub async fn get_save(
    State(state): State<AppState>,
    Path(sub_path): Path<String>,
) -> ServerResult<Json<Value>> {
    read_document(&state, Collection::Saves, &sub_path).await
}

/// Handler for `POST /api/saves/*name`
pub async fn put_save(
    State(state): State<AppState>,
    Path(sub_path): Path<String>,
    body: Bytes,
) -> ServerResult<Json<StatusResponse>> {
    write_document(&state, Collection::Saves, &sub_path, &body).await
}

/// Handler for `DELETE /api/saves/*name`
pub async fn delete_save(
    State(state): State<AppState>,
    Path(sub_path): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    remove_document(&state, Collection::Saves, &sub_path).await
}

/// Handler for `GET /api/presets`
pub async fn list_presets(State(state): State<AppState>) -> ServerResult<Json<Vec<String>>> {
    list_documents(&state, Collection::Presets).await
}

/// Handler for `GET /api/presets/*name`
pub async fn get_preset(
    State(state): State<AppState>,
    Path(sub_path): Path<String>,
) -> ServerResult<Json<Value>> {
    read_document(&state, Collection::Presets, &sub_path).await
}

/// Handler for `POST /api/presets/*name`
pub async fn put_preset(
    State(state): State<AppState>,
    Path(sub_path): Path<String>,
    body: Bytes,
) -> ServerResult<Json<StatusResponse>> {
    write_document(&state, Collection::Presets, &sub_path, &body).await
}

/// Handler for `DELETE /api/presets/*name`
pub async fn delete_preset(
    State(state): State<AppState>,
    Path(sub_path): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    remove_document(&state, Collection::Presets, &sub_path).await
}

/// Answers requests no route accepts (any non-GET method outside the API).
pub async fn api_not_found() -> ServerError {
    ServerError::RouteNotFound
}

async fn list_documents(
    state: &AppState,
    collection: Collection,
) -> ServerResult<Json<Vec<String>>> {
    debug!(collection = collection.dir_name(), "Received request to list documents");
    let names = state.store.list(collection).await?;
    debug!(count = names.len(), "Returning document list");
    Ok(Json(names))
}

async fn read_document(
    state: &AppState,
    collection: Collection,
    sub_path: &str,
) -> ServerResult<Json<Value>> {
    debug!(
        collection = collection.dir_name(),
        path = %sub_path,
        "Received request to read document"
    );
    Ok(Json(state.store.read(collection, sub_path).await?))
}

async fn write_document(
    state: &AppState,
    collection: Collection,
    sub_path: &str,
    body: &[u8],
) -> ServerResult<Json<StatusResponse>> {
    let document = body_to_document(body);
    let file_name = state.store.write(collection, sub_path, &document).await?;
    debug!(collection = collection.dir_name(), document = %file_name, "Document saved");
    Ok(Json(StatusResponse::ok()))
}

async fn remove_document(
    state: &AppState,
    collection: Collection,
    sub_path: &str,
) -> ServerResult<Json<StatusResponse>> {
    debug!(
        collection = collection.dir_name(),
        path = %sub_path,
        "Received request to delete document"
    );
    state.store.remove(collection, sub_path).await?;
    Ok(Json(StatusResponse::ok()))
}
