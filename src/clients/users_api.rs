//! Users and authentication endpoints, plus the assembler for their answers.

use crate::framework::{ApiError, HttpClient, Method, RawResponse, ResourceEndpoint};
use crate::lifecycle::config::ApiPaths;
use crate::model::{Credentials, RoleInfo, SignUp, User};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

const DEFAULT_ROLE: &str = "Client";

/// Client for the users collection and the sign-in/sign-up endpoints.
#[derive(Clone)]
pub struct UsersApi {
    http: HttpClient,
    users: ResourceEndpoint,
    sign_in_path: String,
    sign_up_path: String,
}

impl UsersApi {
    pub fn new(http: HttpClient, paths: &ApiPaths) -> Self {
        Self {
            users: ResourceEndpoint::new(http.clone(), paths.users.clone()),
            http,
            sign_in_path: paths.sign_in.clone(),
            sign_up_path: paths.sign_up.clone(),
        }
    }

    pub async fn get_users(&self) -> Result<RawResponse, ApiError> {
        self.users.get_all().await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<RawResponse, ApiError> {
        self.users.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<RawResponse, ApiError> {
        debug!("Sending request");
        let body = serde_json::to_value(credentials)?;
        self.http
            .request(Method::Post, &self.sign_in_path, Some(body))
            .await
    }

    #[instrument(skip(self))]
    pub async fn sign_up(&self, payload: &SignUp) -> Result<RawResponse, ApiError> {
        debug!("Sending request");
        let body = serde_json::to_value(payload)?;
        self.http
            .request(Method::Post, &self.sign_up_path, Some(body))
            .await
    }

    /// `GET {users}/{id}/role`
    pub async fn user_role(&self, user_id: i64) -> Result<RawResponse, ApiError> {
        let path = format!("{}/{}/role", self.users.path().trim_end_matches('/'), user_id);
        self.http.request(Method::Get, &path, None).await
    }
}

/// Token and normalised user from a sign-in answer.
///
/// Accepts `{token, user: {...}}` and the flat `{token, id, username, ...}`,
/// optionally wrapped in `{data: ...}`. `names` falls back to `username` and
/// `roles` to `"Client"`.
pub fn auth_from_response(body: &Value) -> Result<(String, User), ApiError> {
    let payload = match body.get("data") {
        Some(data) if body.get("token").is_none() && data.is_object() => data,
        _ => body,
    };

    let token = payload
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Decode("sign-in response carries no token".into()))?
        .to_string();

    let source = match payload.get("user") {
        Some(user) if user.is_object() => user,
        _ => payload,
    };
    let mut user = User::deserialize(source)?;
    if user.names.is_empty() {
        user.names = user.username.clone();
    }
    if user.roles.is_empty() {
        user.roles = DEFAULT_ROLE.to_string();
    }
    Ok((token, user))
}

/// Role answer of `GET /users/{id}/role`.
pub fn role_from_response(body: &Value) -> Result<RoleInfo, ApiError> {
    let payload = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    Ok(RoleInfo::deserialize(payload)?)
}
