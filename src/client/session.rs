use crate::api::controllers::dto::user_dto::UserDTO;
use crate::client::errors::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Key under which the session lives in the storage file.
pub const SESSION_KEY: &str = "brewery:session";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserDTO>,
    pub signed: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    hydrated: bool,
    session: Session,
}

/// Session persisted as one key of a JSON storage file. Other keys in the
/// file are left untouched. Every change is written through immediately.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl SessionStore {
    /// The store starts un-hydrated; call [`SessionStore::hydrate`] before
    /// trusting its contents.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore {
            path: path.into(),
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session. A missing file or key yields a signed-out
    /// session.
    pub fn hydrate(&self) -> Result<Session, ClientError> {
        let session = match read_storage(&self.path)?.remove(SESSION_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => Session::default(),
        };

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.session = session.clone();
        state.hydrated = true;

        tracing::debug!("Session hydrated (signed: {})", session.signed);
        Ok(session)
    }

    pub fn is_hydrated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .hydrated
    }

    pub fn session(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session().token
    }

    pub fn sign_in(&self, token: String, user: UserDTO) -> Result<(), ClientError> {
        self.replace(Session {
            token: Some(token),
            user: Some(user),
            signed: true,
        })
    }

    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.replace(Session::default())
    }

    fn replace(&self, session: Session) -> Result<(), ClientError> {
        let mut storage = read_storage(&self.path)?;
        storage.insert(SESSION_KEY.to_string(), serde_json::to_value(&session)?);
        write_storage(&self.path, &storage)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.session = session;
        state.hydrated = true;

        Ok(())
    }
}

fn read_storage(path: &Path) -> Result<Map<String, Value>, ClientError> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.is_empty() => Ok(Map::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_storage(path: &Path, storage: &Map<String, Value>) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, serde_json::to_vec_pretty(storage)?)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}
