//! # hostel-client
//!
//! > **Typed, observable REST stores for a hotel-management backend.**
//!
//! Each store follows one pattern: call an HTTP endpoint, map the JSON answer
//! to plain records, keep them in observable state, and track `loading` and
//! `errors` alongside.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: one store, four resources
//! `ResourceStore<T: Resource>` is written once. Hotels, rooms, reservations
//! and subscriptions only describe their record (`Resource` impl in their
//! `entity.rs`) and wrap the generic store in a domain-named API.
//!
//! ### Errors are state
//! Store actions never return `Err`. A failed request is appended to the
//! store's `errors` list and the action returns `false` (mutations) or leaves
//! the previous data in place (fetches).
//!
//! ### Latest action wins
//! Actions may overlap. Each takes a ticket; only the newest may publish, so
//! a slow old response can never overwrite a newer one.
//!
//! ### Mocking
//! Stores talk to an [`HttpTransport`](framework::HttpTransport) trait object.
//! Tests plug in [`MockTransport`](framework::mock::MockTransport) or the
//! channel-driven transport from [`framework::mock`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! HTTP client and transport, generic endpoint, assembler, `ResourceStore`,
//! session persistence.
//!
//! ### 2. The Records ([`model`])
//! `Hotel`, `Room`, `Reservation`, `Subscription`, `User` and their drafts.
//!
//! ### 3. The Stores ([`hotel_store`], [`room_store`], [`reservation_store`], [`subscription_store`], [`auth_store`])
//! Domain-named operations on top of the engine.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! Configuration, logging and [`HostelSystem`](lifecycle::HostelSystem), which
//! wires every store to one client so the signed-in token is shared.
//!
//! ## Running the Demo
//!
//! ```bash
//! HOSTEL_API_URL=http://localhost:8080/api/v1 RUST_LOG=info cargo run -- hostel.toml
//! ```

pub mod auth_store;
pub mod clients;
pub mod framework;
pub mod hotel_store;
pub mod lifecycle;
pub mod model;
pub mod reservation_store;
pub mod room_store;
pub mod subscription_store;
