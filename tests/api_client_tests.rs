#![cfg(feature = "client")]

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use brewery_server_lib::api::controllers::dto::user_dto::UserDTO;
use brewery_server_lib::client::{ApiClient, ClientError, SessionStore};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/api/v1/", addr)
}

fn stub() -> Router {
    Router::new()
        .route(
            "/api/v1/echo",
            get(|headers: HeaderMap| async move {
                let authorization = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!({ "authorization": authorization }))
            }),
        )
        .route(
            "/api/v1/packages",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Token invalid." })),
                )
            }),
        )
        .route(
            "/api/v1/sizes",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Size not found." })),
                )
            }),
        )
}

fn admin() -> UserDTO {
    UserDTO {
        id: 1,
        name: "Admin".to_string(),
        email: "admin@brewery.local".to_string(),
        kind: "individual".to_string(),
        document: None,
        state_registration: None,
        administrator: true,
        guest: false,
    }
}

fn signed_store(dir: &tempfile::TempDir) -> Arc<SessionStore> {
    let store = Arc::new(SessionStore::new(dir.path().join("storage.json")));
    store.sign_in("stored-token".to_string(), admin()).unwrap();
    store
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let dir = tempfile::tempdir().unwrap();
    let client = ApiClient::new(serve(stub()).await, signed_store(&dir));

    let echoed: Value = client.get("/echo").await.unwrap();

    assert_eq!(echoed, json!({ "authorization": "Bearer stored-token" }));
}

#[tokio::test]
async fn unauthorized_answer_clears_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = signed_store(&dir);
    let client = ApiClient::new(serve(stub()).await, store.clone());

    let result = client.get::<Value>("packages").await;

    match result {
        Err(ClientError::Unauthorized(message)) => assert_eq!(message, "Token invalid."),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    assert!(!store.session().signed);

    let reopened = SessionStore::new(store.path());
    assert!(!reopened.hydrate().unwrap().signed);
}

#[tokio::test]
async fn error_bodies_become_api_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = signed_store(&dir);
    let client = ApiClient::new(serve(stub()).await, store.clone());

    match client.get::<Value>("/sizes").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Size not found.");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(store.session().signed);
}
