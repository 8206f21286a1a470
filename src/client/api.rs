use crate::api::controllers::dto::session_dto::{SessionDTO, SessionRequest};
use crate::api::response::ErrorBody;
use crate::client::errors::ClientError;
use crate::client::session::SessionStore;
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// HTTP client for the `/api/v1` routes. Sends the stored bearer token and
/// signs the session out whenever the API answers 401.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        ApiClient {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    /// Reads the base URL from `API_URL`.
    pub fn from_env(session: Arc<SessionStore>) -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("API_URL").map_err(|_| ClientError::MissingBaseUrl)?;
        Ok(ApiClient::new(base_url, session))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Opens a session and persists the returned token and user.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionDTO, ClientError> {
        let request = SessionRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let created: SessionDTO = self.post("/sessions", &request).await?;
        self.session
            .sign_in(created.token.clone(), created.user.clone())?;

        Ok(created)
    }

    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.session.sign_out()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
    ) -> Result<T, ClientError> {
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("API answered 401 ({}), clearing session", message);
            self.session.sign_out()?;
            return Err(ClientError::Unauthorized(message));
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
