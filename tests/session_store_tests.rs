use brewery_server_lib::api::controllers::dto::user_dto::UserDTO;
use brewery_server_lib::client::session::SESSION_KEY;
use brewery_server_lib::client::{GuardDecision, SessionStore, admin_guard, signed_guard};
use serde_json::{Value, json};

fn user(administrator: bool, guest: bool) -> UserDTO {
    UserDTO {
        id: 7,
        name: "Ana".to_string(),
        email: "ana@brewery.local".to_string(),
        kind: "individual".to_string(),
        document: None,
        state_registration: None,
        administrator,
        guest,
    }
}

fn stored(store: &SessionStore) -> Value {
    let bytes = std::fs::read(store.path()).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn missing_file_hydrates_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("storage.json"));

    assert!(!store.is_hydrated());
    let session = store.hydrate().unwrap();

    assert!(store.is_hydrated());
    assert!(!session.signed);
    assert_eq!(session.token, None);
}

#[test]
fn sign_in_persists_under_session_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = SessionStore::new(&path);
    store.sign_in("abc".to_string(), user(true, false)).unwrap();

    let persisted = stored(&store);
    assert_eq!(persisted[SESSION_KEY]["token"], json!("abc"));
    assert_eq!(persisted[SESSION_KEY]["signed"], json!(true));

    let reopened = SessionStore::new(&path);
    let session = reopened.hydrate().unwrap();
    assert!(session.signed);
    assert_eq!(session.user, Some(user(true, false)));
}

#[test]
fn sign_out_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, json!({ "theme": "dark" }).to_string()).unwrap();

    let store = SessionStore::new(&path);
    store.sign_in("abc".to_string(), user(false, false)).unwrap();
    store.sign_out().unwrap();

    let persisted = stored(&store);
    assert_eq!(persisted["theme"], json!("dark"));
    assert_eq!(persisted[SESSION_KEY]["signed"], json!(false));
    assert_eq!(store.token(), None);
}

#[test]
fn corrupt_storage_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = SessionStore::new(&path);
    assert!(store.hydrate().is_err());
    assert!(!store.is_hydrated());
}

#[test]
fn guards_wait_for_hydration() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("storage.json"));

    assert_eq!(signed_guard(&store), GuardDecision::Pending);
    assert_eq!(admin_guard(&store, true), GuardDecision::Pending);

    store.hydrate().unwrap();
    assert_eq!(signed_guard(&store), GuardDecision::Redirect("/"));
    assert_eq!(admin_guard(&store, false), GuardDecision::Redirect("/"));
}

#[test]
fn admin_guard_sends_non_admins_to_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("storage.json"));
    store.hydrate().unwrap();

    store.sign_in("t".to_string(), user(false, false)).unwrap();
    assert_eq!(signed_guard(&store), GuardDecision::Render);
    assert_eq!(admin_guard(&store, true), GuardDecision::Redirect("/dashboard"));

    store.sign_in("t".to_string(), user(false, true)).unwrap();
    assert_eq!(admin_guard(&store, true), GuardDecision::Render);
    assert_eq!(admin_guard(&store, false), GuardDecision::Redirect("/dashboard"));

    store.sign_in("t".to_string(), user(true, false)).unwrap();
    assert_eq!(admin_guard(&store, false), GuardDecision::Render);
}
