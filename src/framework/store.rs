//! # Generic Resource Store
//!
//! This module defines `ResourceStore<T>`, the observable state container that
//! every per-kind store wraps. It is written once and reused for hotels, rooms,
//! reservations and subscriptions.
//!
//! ## Action shape
//!
//! Every action follows the same steps:
//!
//! 1. `loading = true`, `errors` cleared.
//! 2. Endpoint call, then the assembler.
//! 3. On success `items` or `current` is replaced wholesale. Mutations then
//!    refresh the collection according to a [`Refresh`] policy.
//! 4. On failure exactly one error is appended; `items` and `current` stay as
//!    they were.
//! 5. `loading = false` on every path.
//!
//! ## Overlapping actions
//!
//! Each action takes a ticket from a monotonic counter. Only the holder of the
//! latest ticket may publish results, record errors or clear `loading`; the
//! results of a superseded action are dropped. Ticket checks happen under the
//! `watch` lock, so a stale action can never interleave with a newer one.
//!
//! ## Observing state
//!
//! State is published through a [`tokio::sync::watch`] channel. Call
//! [`ResourceStore::subscribe`] to be woken on every change, or read a copy
//! with [`ResourceStore::snapshot`].

use crate::framework::endpoint::ResourceEndpoint;
use crate::framework::error::ApiError;
use crate::framework::resource::Resource;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Observable state of one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub loading: bool,
    pub errors: Vec<ApiError>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            errors: Vec::new(),
        }
    }
}

/// Where filter-by-foreign-key queries are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStrategy {
    /// `GET P?key=value`
    #[default]
    Server,
    /// `GET P`, then keep records whose key equals the value as an integer.
    Local,
}

/// What to reload after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    All,
    Filter { key: String, value: String },
    Nothing,
}

impl Refresh {
    pub fn filter(key: impl Into<String>, value: impl Display) -> Self {
        Refresh::Filter {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Shared handle to the state of one resource kind. Cheap to clone.
#[derive(Clone)]
pub struct ResourceStore<T: Resource> {
    endpoint: ResourceEndpoint,
    filter: FilterStrategy,
    state: Arc<watch::Sender<StoreState<T>>>,
    generation: Arc<AtomicU64>,
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(endpoint: ResourceEndpoint, filter: FilterStrategy) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            endpoint,
            filter,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn endpoint(&self) -> &ResourceEndpoint {
        &self.endpoint
    }

    pub fn filter_strategy(&self) -> FilterStrategy {
        self.filter
    }

    // --- Reads ---

    pub fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState<T> {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.state.borrow().items.clone()
    }

    pub fn current(&self) -> Option<T> {
        self.state.borrow().current.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn errors(&self) -> Vec<ApiError> {
        self.state.borrow().errors.clone()
    }

    /// Looks up a loaded item by id.
    pub fn find(&self, id: &T::Id) -> Option<T> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
    }

    // --- Ticket bookkeeping ---

    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.loading = true;
            state.errors.clear();
        });
        ticket
    }

    fn publish(&self, ticket: u64, apply: impl FnOnce(&mut StoreState<T>)) {
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            apply(state);
            true
        });
        if !published {
            debug!(resource = T::COLLECTION, ticket, "Discarding stale result");
        }
    }

    fn fail(&self, ticket: u64, error: ApiError) {
        warn!(resource = T::COLLECTION, error = %error, "Action failed");
        self.publish(ticket, |state| state.errors.push(error));
    }

    fn finish(&self, ticket: u64) {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            state.loading = false;
            true
        });
    }

    // --- Loads (no state changes) ---

    async fn load_all(&self) -> Result<Vec<T>, ApiError> {
        let response = self.endpoint.get_all().await?;
        Ok(T::from_response(&response.body))
    }

    async fn load_filtered(&self, key: &str, value: &str) -> Result<Vec<T>, ApiError> {
        match self.filter {
            FilterStrategy::Server => {
                let params = [(key.to_string(), value.to_string())];
                let response = self.endpoint.list_by_query(&params).await?;
                Ok(T::from_response(&response.body))
            }
            FilterStrategy::Local => Ok(filter_local(self.load_all().await?, key, value)),
        }
    }

    async fn load_refresh(&self, refresh: &Refresh) -> Option<Result<Vec<T>, ApiError>> {
        match refresh {
            Refresh::All => Some(self.load_all().await),
            Refresh::Filter { key, value } => Some(self.load_filtered(key, value).await),
            Refresh::Nothing => None,
        }
    }

    fn store_items(&self, ticket: u64, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => {
                info!(resource = T::COLLECTION, count = items.len(), "Loaded");
                self.publish(ticket, |state| state.items = items);
            }
            Err(e) => self.fail(ticket, e),
        }
    }

    // --- Actions ---

    /// Replaces `items` with the full collection.
    #[instrument(skip(self), fields(resource = T::COLLECTION))]
    pub async fn fetch_all(&self) {
        let ticket = self.begin();
        let result = self.load_all().await;
        self.store_items(ticket, result);
        self.finish(ticket);
    }

    /// Replaces `items` with the records whose `key` equals `value`.
    #[instrument(skip(self, value), fields(resource = T::COLLECTION, value = %value))]
    pub async fn fetch_by_filter(&self, key: &str, value: impl Display) {
        let value = value.to_string();
        let ticket = self.begin();
        let result = self.load_filtered(key, &value).await;
        self.store_items(ticket, result);
        self.finish(ticket);
    }

    /// Replaces `current` with the record `id`.
    #[instrument(skip(self), fields(resource = T::COLLECTION))]
    pub async fn fetch_by_id(&self, id: &T::Id) {
        let ticket = self.begin();
        let result = match self.endpoint.get_by_id(id).await {
            Ok(response) => T::from_resource(&response.body),
            Err(e) => Err(e),
        };
        match result {
            Ok(item) => {
                info!(resource = T::COLLECTION, %id, "Loaded one");
                self.publish(ticket, |state| state.current = Some(item));
            }
            Err(e) => self.fail(ticket, e),
        }
        self.finish(ticket);
    }

    /// `POST`s a new record, then refreshes.
    #[instrument(skip(self, draft), fields(resource = T::COLLECTION))]
    pub async fn create(&self, draft: &T::Create, refresh: Refresh) -> bool {
        debug!(?draft, "create called");
        let ticket = self.begin();
        let result = self.endpoint.create(draft).await;
        self.complete_mutation(ticket, result.map(drop), &refresh, "Created")
            .await
    }

    /// `PUT`s a record, then refreshes.
    #[instrument(skip(self, draft), fields(resource = T::COLLECTION))]
    pub async fn update(&self, id: &T::Id, draft: &T::Update, refresh: Refresh) -> bool {
        debug!(?draft, "update called");
        let ticket = self.begin();
        let result = self.endpoint.update(id, draft).await;
        self.complete_mutation(ticket, result.map(drop), &refresh, "Updated")
            .await
    }

    /// `DELETE`s a record, then refreshes.
    #[instrument(skip(self), fields(resource = T::COLLECTION))]
    pub async fn delete(&self, id: &T::Id, refresh: Refresh) -> bool {
        let ticket = self.begin();
        let result = self.endpoint.delete(id).await;
        self.complete_mutation(ticket, result.map(drop), &refresh, "Deleted")
            .await
    }

    /// Calls a state-transition endpoint (`PATCH P/{id}/{name}`), then refreshes.
    #[instrument(skip(self), fields(resource = T::COLLECTION))]
    pub async fn transition(&self, id: &T::Id, name: &str, refresh: Refresh) -> bool {
        let ticket = self.begin();
        let result = self.endpoint.transition(id, name).await;
        self.complete_mutation(ticket, result.map(drop), &refresh, "Transitioned")
            .await
    }

    async fn complete_mutation(
        &self,
        ticket: u64,
        result: Result<(), ApiError>,
        refresh: &Refresh,
        done: &'static str,
    ) -> bool {
        let ok = match result {
            Ok(()) => {
                info!(resource = T::COLLECTION, "{}", done);
                // A failed reload is recorded but does not undo the mutation.
                if let Some(reloaded) = self.load_refresh(refresh).await {
                    self.store_items(ticket, reloaded);
                }
                true
            }
            Err(e) => {
                self.fail(ticket, e);
                false
            }
        };
        self.finish(ticket);
        ok
    }
}

/// Keeps the records whose `key` equals `value` read as an integer.
///
/// A value that is not an integer matches nothing.
pub fn filter_local<T: Resource>(items: Vec<T>, key: &str, value: &str) -> Vec<T> {
    let Ok(wanted) = value.trim().parse::<i64>() else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter(|item| item.foreign_key(key) == Some(wanted))
        .collect()
}

/// Read access shared by every per-kind store.
///
/// Implementors only provide [`EntityStore::inner`]; the reads come for free.
pub trait EntityStore<T: Resource> {
    fn inner(&self) -> &ResourceStore<T>;

    fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.inner().subscribe()
    }

    fn snapshot(&self) -> StoreState<T> {
        self.inner().snapshot()
    }

    fn loading(&self) -> bool {
        self.inner().loading()
    }

    fn errors(&self) -> Vec<ApiError> {
        self.inner().errors()
    }
}
