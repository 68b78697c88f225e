//! # Generic Resource Endpoint
//!
//! Translates CRUD verbs on one base path into conventional REST calls. This is
//! the only place that knows how resource URLs are shaped.

use crate::framework::error::ApiError;
use crate::framework::http::{HttpClient, Method, RawResponse};
use serde::Serialize;
use std::fmt::Display;

/// REST access to the collection at `path`.
#[derive(Clone)]
pub struct ResourceEndpoint {
    http: HttpClient,
    path: String,
}

impl ResourceEndpoint {
    pub fn new(http: HttpClient, path: impl Into<String>) -> Self {
        Self {
            http,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), id)
    }

    /// `GET P`
    pub async fn get_all(&self) -> Result<RawResponse, ApiError> {
        self.http.request(Method::Get, &self.path, None).await
    }

    /// `GET P/{id}`
    pub async fn get_by_id(&self, id: impl Display) -> Result<RawResponse, ApiError> {
        self.http.request(Method::Get, &self.item_path(id), None).await
    }

    /// `POST P` with the resource as JSON body.
    pub async fn create<B: Serialize + ?Sized>(&self, resource: &B) -> Result<RawResponse, ApiError> {
        let body = serde_json::to_value(resource)?;
        self.http.request(Method::Post, &self.path, Some(body)).await
    }

    /// `PUT P/{id}` with the resource as JSON body.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: impl Display,
        resource: &B,
    ) -> Result<RawResponse, ApiError> {
        let body = serde_json::to_value(resource)?;
        self.http
            .request(Method::Put, &self.item_path(id), Some(body))
            .await
    }

    /// `DELETE P/{id}`
    pub async fn delete(&self, id: impl Display) -> Result<RawResponse, ApiError> {
        self.http.request(Method::Delete, &self.item_path(id), None).await
    }

    /// `GET P?k1=v1&k2=v2`
    pub async fn list_by_query(&self, params: &[(String, String)]) -> Result<RawResponse, ApiError> {
        self.http
            .request_with_query(Method::Get, &self.path, params, None)
            .await
    }

    /// `PATCH P/{id}/{name}`, for state-transition endpoints such as `check-in`.
    pub async fn transition(&self, id: impl Display, name: &str) -> Result<RawResponse, ApiError> {
        let path = format!("{}/{}", self.item_path(id), name);
        self.http.request(Method::Patch, &path, None).await
    }
}
