use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

use wolfden_core::DocumentStore;
use wolfden_server::handlers;
use wolfden_server::models::StatusResponse;
use wolfden_server::AppState;

// Keeps the TempDir alive for as long as the state is in use.
async fn create_test_app_state() -> (AppState, TempDir) {
    let temp_dir = tempdir().unwrap();
    let store = DocumentStore::new(temp_dir.path());
    store.ensure_layout().await.unwrap();
    (AppState::new(store), temp_dir)
}

fn body(value: Value) -> Bytes {
    Bytes::from(serde_json::to_vec(&value).unwrap())
}

#[tokio::test]
async fn test_save_lifecycle() {
    let (state, _dir) = create_test_app_state().await;
    let game = json!({"round": 2, "log": ["night falls", "天亮了"]});

    let name = Path("session-1".to_string());
    let ack = handlers::put_save(State(state.clone()), name, body(game.clone()))
        .await
        .expect("Failed to save game");
    assert_eq!(ack.0, StatusResponse::ok());

    let names = handlers::list_saves(State(state.clone())).await.unwrap();
    assert_eq!(names.0, vec!["session-1.json".to_string()]);

    let loaded = handlers::get_save(State(state.clone()), Path("session-1.json".to_string()))
        .await
        .unwrap();
    assert_eq!(loaded.0, game);

    handlers::delete_save(State(state.clone()), Path("session-1.json".to_string()))
        .await
        .expect("Failed to delete save");

    let err = handlers::get_save(State(state.clone()), Path("session-1.json".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = handlers::delete_save(State(state), Path("session-1.json".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_presets_do_not_leak_into_saves() {
    let (state, _dir) = create_test_app_state().await;

    let name = Path("twelve-players.json".to_string());
    handlers::put_preset(State(state.clone()), name, body(json!({"wolves": 4})))
        .await
        .unwrap();

    assert!(handlers::list_saves(State(state.clone())).await.unwrap().0.is_empty());
    assert_eq!(
        handlers::list_presets(State(state.clone())).await.unwrap().0,
        vec!["twelve-players.json".to_string()]
    );
    assert_eq!(
        handlers::get_preset(State(state), Path("twelve-players.json".to_string()))
            .await
            .unwrap()
            .0,
        json!({"wolves": 4})
    );
}

#[tokio::test]
async fn test_unparsable_body_is_stored_as_empty_object() {
    let (state, dir) = create_test_app_state().await;

    let junk = Bytes::from_static(b"not json at all");
    handlers::put_save(State(state.clone()), Path("junk".to_string()), junk)
        .await
        .unwrap();

    let stored = std::fs::read_to_string(dir.path().join("saves").join("junk.json")).unwrap();
    assert_eq!(stored, "{}");
}

#[tokio::test]
async fn test_config_update_keeps_port_and_unknown_fields() {
    let (state, dir) = create_test_app_state().await;
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"apiBase": "http://127.0.0.1:8000/v1", "apiKey": "", "port": 8080,
            "rolesSetup": {"witch": 1}}"#,
    )
    .unwrap();

    handlers::update_config(State(state.clone()), body(json!({"apiKey": "abc", "port": 9999})))
        .await
        .unwrap();

    let config = handlers::get_config(State(state)).await.0.into_value();
    assert_eq!(
        config,
        json!({
            "apiBase": "http://127.0.0.1:8000/v1",
            "apiKey": "abc",
            "port": 8080,
            "rolesSetup": {"witch": 1}
        })
    );
}

#[tokio::test]
async fn test_default_prompt_missing_then_present() {
    let (state, dir) = create_test_app_state().await;

    let err = handlers::get_default_prompt(State(state.clone())).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    std::fs::write(dir.path().join("default_prompt.json"), r#"{"judge": "主持人"}"#).unwrap();
    let prompt = handlers::get_default_prompt(State(state)).await.unwrap();
    assert_eq!(prompt.0, json!({"judge": "主持人"}));
}

#[tokio::test]
async fn test_invalid_names_are_bad_requests() {
    let (state, _dir) = create_test_app_state().await;

    let name = Path("saves/..".to_string());
    let err = handlers::put_save(State(state.clone()), name, body(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = handlers::get_preset(State(state), Path("..\\config.json".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
