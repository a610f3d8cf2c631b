use crate::{ClientError, ClientResult, ClientSummary, CredentialProvider, LoginResponse};

use studio_auth::{Identity, LoginCredentials};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde_json::Value;

const LOGIN_PATH: &str = "/api/auth/login";
const ME_PATH: &str = "/api/auth/me";
const CLIENTS_PATH: &str = "/api/clients";
const LICENSES_PATH: &str = "/api/licenses";
const PROJECTS_PATH: &str = "/api/projects";

/// HTTP client for the studio backend REST API
#[derive(Clone)]
pub struct Client {
    pub base_url: String,
    credentials: Option<Arc<dyn CredentialProvider>>,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://localhost:5147")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
            client: ReqwestClient::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
            client,
        })
    }

    /// Attach a credential provider; every later request carries its
    /// credential as a bearer token.
    pub fn with_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    pub fn has_credential(&self) -> bool {
        self.credentials
            .as_ref()
            .and_then(|p| p.credential())
            .is_some_and(|c| !c.is_empty())
    }

    /// Build a request with the bearer credential, if any
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");
        let mut req = self.client.request(method, &url);

        if let Some(credential) = self.credentials.as_ref().and_then(|p| p.credential())
            && !credential.is_empty()
        {
            req = req.bearer_auth(credential);
        }

        req
    }

    /// Execute request and map non-2xx responses to `ClientError::Status`
    async fn execute(&self, req: reqwest::RequestBuilder) -> ClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let payload = serde_json::from_slice::<Value>(&bytes).ok();

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                warn!("Authorization failure on {url}: {status}");
            }

            let message = payload
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            return Err(ClientError::status_error(status.as_u16(), message, payload));
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Exchange email/password for a credential and identity
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<LoginResponse> {
        let req = self.request(Method::POST, LOGIN_PATH).json(credentials);
        let body = self.execute(req).await?;
        let response: LoginResponse = serde_json::from_value(body)?;

        if response.token.is_empty() {
            return Err(ClientError::invalid_response(
                "login response did not contain a token",
            ));
        }

        Ok(response)
    }

    /// Identity of the current credential (who-am-I)
    pub async fn me(&self) -> ClientResult<Identity> {
        let req = self.request(Method::GET, ME_PATH);
        let body = self.execute(req).await?;
        Ok(serde_json::from_value(body)?)
    }

    // =========================================================================
    // Resource Listings
    // =========================================================================

    /// List all clients. An empty body is an empty list.
    pub async fn list_clients(&self) -> ClientResult<Vec<ClientSummary>> {
        let req = self.request(Method::GET, CLIENTS_PATH);
        match self.execute(req).await? {
            Value::Null => Ok(Vec::new()),
            body => Ok(serde_json::from_value(body)?),
        }
    }

    /// List all licenses
    pub async fn list_licenses(&self) -> ClientResult<Value> {
        let req = self.request(Method::GET, LICENSES_PATH);
        self.execute(req).await
    }

    /// List all projects
    pub async fn list_projects(&self) -> ClientResult<Value> {
        let req = self.request(Method::GET, PROJECTS_PATH);
        self.execute(req).await
    }
}

/// Pull a human-readable message out of the error shapes the backend uses:
/// `{"message": ..}`, `{"error": {"message": ..}}`, `{"error": ".."}` and
/// problem-details `{"title": ..}`.
pub(crate) fn error_message(payload: &Value) -> Option<String> {
    if let Some(s) = payload.as_str() {
        return Some(s.to_string());
    }

    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            payload
                .get("error")
                .and_then(|e| e.get("message").and_then(Value::as_str).or(e.as_str()))
        })
        .or_else(|| payload.get("title").and_then(Value::as_str))
        .map(String::from)
}
