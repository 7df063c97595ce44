//! HTTP client for the user management API. Every call carries the caller's
//! credentials as HTTP Basic auth; nothing is cached between calls. Failures are
//! translated into [`ApiError`] using the server's `message` field when present,
//! else the operation's localized fallback. Credentials are never logged.

use crate::{
    error::{ApiError, Operation},
    model::{
        ChangePasswordRequest, CreateUserRequest, ErrorPayload, UpdateUserRequest, User, UserId,
    },
};
use reqwest::{Client, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/users";

/// Username and password re-sent with every request.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// One method per REST action under `/api/users`.
#[allow(async_fn_in_trait)]
pub trait UserApi {
    /// `GET /`
    async fn list_users(&self, credentials: &Credentials) -> Result<Vec<User>, ApiError>;

    /// `GET /{id}`
    async fn get_user(&self, credentials: &Credentials, id: UserId) -> Result<User, ApiError>;

    /// `GET /username/{username}`
    async fn get_user_by_username(
        &self,
        credentials: &Credentials,
        username: &str,
    ) -> Result<User, ApiError>;

    /// `POST /`
    async fn create_user(
        &self,
        credentials: &Credentials,
        request: &CreateUserRequest,
    ) -> Result<User, ApiError>;

    /// `PUT /{id}`
    async fn update_user(
        &self,
        credentials: &Credentials,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<User, ApiError>;

    /// `DELETE /{id}`
    async fn delete_user(&self, credentials: &Credentials, id: UserId) -> Result<(), ApiError>;

    /// `POST /{id}/activate`; `None` when the server sends no body.
    async fn activate_user(
        &self,
        credentials: &Credentials,
        id: UserId,
    ) -> Result<Option<User>, ApiError>;

    /// `POST /{id}/deactivate`; `None` when the server sends no body.
    async fn deactivate_user(
        &self,
        credentials: &Credentials,
        id: UserId,
    ) -> Result<Option<User>, ApiError>;

    /// `POST /{id}/change-password` with `{ newPassword }`.
    async fn change_password(
        &self,
        credentials: &Credentials,
        id: UserId,
        new_password: &str,
    ) -> Result<(), ApiError>;

    /// `POST /{id}/reset-wrong-password`
    async fn reset_wrong_password(
        &self,
        credentials: &Credentials,
        id: UserId,
    ) -> Result<(), ApiError>;

    /// `GET /role/{role}`
    async fn list_users_by_role(
        &self,
        credentials: &Credentials,
        role: &str,
    ) -> Result<Vec<User>, ApiError>;
}

/// `reqwest` implementation of [`UserApi`]; works natively and on `wasm32`.
#[derive(Clone, Debug)]
pub struct UserClient {
    http: Client,
    base_url: Url,
}

impl UserClient {
    /// # Errors
    /// Returns [`ApiError::Config`] if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Uses a preconfigured `reqwest` client, e.g. one with a custom user agent.
    /// # Errors
    /// Returns [`ApiError::Config`] if `base_url` is not an absolute http(s) URL.
    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins percent-encoded path segments onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        credentials: &Credentials,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let span = info_span!(
            "user_api.request",
            operation = operation.as_str(),
            http.method = %method,
            path = url.path()
        );

        let mut request = self.http.request(method, url).basic_auth(
            credentials.username(),
            Some(credentials.password().expose_secret()),
        );
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().instrument(span).await.map_err(|err| {
            warn!(%operation, "request failed: {err}");
            ApiError::fallback(operation, None)
        })?;

        if response.status().is_success() {
            debug!(%operation, status = response.status().as_u16(), "request succeeded");
            Ok(response)
        } else {
            Err(error_from_response(operation, response).await)
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        credentials: &Credentials,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self
            .execute(operation, method, url, credentials, body)
            .await?;
        let status = response.status().as_u16();

        response.json::<T>().await.map_err(|err| {
            warn!(%operation, "failed to decode response: {err}");
            ApiError::fallback(operation, Some(status))
        })
    }

    async fn fetch_optional_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        credentials: &Credentials,
        body: Option<Value>,
    ) -> Result<Option<T>, ApiError> {
        let response = self
            .execute(operation, method, url, credentials, body)
            .await?;
        let status = response.status().as_u16();

        let bytes = response.bytes().await.map_err(|err| {
            warn!(%operation, "failed to read response: {err}");
            ApiError::fallback(operation, Some(status))
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|err| {
            warn!(%operation, "failed to decode response: {err}");
            ApiError::fallback(operation, Some(status))
        })
    }

    async fn send_empty(
        &self,
        operation: Operation,
        method: Method,
        url: Url,
        credentials: &Credentials,
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        self.execute(operation, method, url, credentials, body)
            .await
            .map(drop)
    }
}

impl UserApi for UserClient {
    async fn list_users(&self, credentials: &Credentials) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint(&[]);
        self.fetch_json(Operation::ListUsers, Method::GET, url, credentials, None)
            .await
    }

    async fn get_user(&self, credentials: &Credentials, id: UserId) -> Result<User, ApiError> {
        let url = self.endpoint(&[id.to_string().as_str()]);
        self.fetch_json(Operation::GetUser, Method::GET, url, credentials, None)
            .await
    }

    async fn get_user_by_username(
        &self,
        credentials: &Credentials,
        username: &str,
    ) -> Result<User, ApiError> {
        let url = self.endpoint(&["username", username.trim()]);
        self.fetch_json(
            Operation::GetUserByUsername,
            Method::GET,
            url,
            credentials,
            None,
        )
        .await
    }

    async fn create_user(
        &self,
        credentials: &Credentials,
        request: &CreateUserRequest,
    ) -> Result<User, ApiError> {
        let url = self.endpoint(&[]);
        let body = encode(Operation::CreateUser, request)?;
        self.fetch_json(
            Operation::CreateUser,
            Method::POST,
            url,
            credentials,
            Some(body),
        )
        .await
    }

    async fn update_user(
        &self,
        credentials: &Credentials,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> Result<User, ApiError> {
        let url = self.endpoint(&[id.to_string().as_str()]);
        let body = encode(Operation::UpdateUser, request)?;
        self.fetch_json(
            Operation::UpdateUser,
            Method::PUT,
            url,
            credentials,
            Some(body),
        )
        .await
    }

    async fn delete_user(&self, credentials: &Credentials, id: UserId) -> Result<(), ApiError> {
        let url = self.endpoint(&[id.to_string().as_str()]);
        self.send_empty(Operation::DeleteUser, Method::DELETE, url, credentials, None)
            .await
    }

    async fn activate_user(
        &self,
        credentials: &Credentials,
        id: UserId,
    ) -> Result<Option<User>, ApiError> {
        let url = self.endpoint(&[id.to_string().as_str(), "activate"]);
        self.fetch_optional_json(
            Operation::ActivateUser,
            Method::POST,
            url,
            credentials,
            Some(json!({})),
        )
        .await
    }

    async fn deactivate_user(
        &self,
        credentials: &Credentials,
        id: UserId,
    ) -> Result<Option<User>, ApiError> {
        let url = self.endpoint(&[id.to_string().as_str(), "deactivate"]);
        self.fetch_optional_json(
            Operation::DeactivateUser,
            Method::POST,
            url,
            credentials,
            Some(json!({})),
        )
        .await
    }

    async fn change_password(
        &self,
        credentials: &Credentials,
        id: UserId,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&[id.to_string().as_str(), "change-password"]);
        let body = encode(
            Operation::ChangePassword,
            &ChangePasswordRequest {
                new_password: new_password.to_string(),
            },
        )?;
        self.send_empty(
            Operation::ChangePassword,
            Method::POST,
            url,
            credentials,
            Some(body),
        )
        .await
    }

    async fn reset_wrong_password(
        &self,
        credentials: &Credentials,
        id: UserId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&[id.to_string().as_str(), "reset-wrong-password"]);
        self.send_empty(
            Operation::ResetWrongPassword,
            Method::POST,
            url,
            credentials,
            Some(json!({})),
        )
        .await
    }

    async fn list_users_by_role(
        &self,
        credentials: &Credentials,
        role: &str,
    ) -> Result<Vec<User>, ApiError> {
        let url = self.endpoint(&["role", role.trim()]);
        self.fetch_json(
            Operation::ListUsersByRole,
            Method::GET,
            url,
            credentials,
            None,
        )
        .await
    }
}

/// Parses and validates the API base URL.
/// # Errors
/// Returns [`ApiError::Config`] for unparsable URLs or non-http(s) schemes.
pub fn parse_base_url(value: &str) -> Result<Url, ApiError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("API-URL '{trimmed}' ist ungültig: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ApiError::Config(format!(
            "API-URL '{trimmed}' verwendet das nicht unterstützte Schema '{scheme}'"
        ))),
    }
}

fn encode<B: Serialize>(operation: Operation, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| {
        warn!(%operation, "failed to encode request: {err}");
        ApiError::fallback(operation, None)
    })
}

async fn error_from_response(operation: Operation, response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match server_message(&body) {
        Some(message) => {
            debug!(%operation, status, "server rejected request: {message}");
            ApiError::Server { status, message }
        }
        None => {
            debug!(%operation, status, "server rejected request without message");
            ApiError::fallback(operation, Some(status))
        }
    }
}

/// Extracts a non-blank `message` from a JSON error body, as sent.
fn server_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    payload
        .message
        .filter(|message| !message.trim().is_empty())
}
