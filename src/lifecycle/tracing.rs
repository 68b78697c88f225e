//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Store actions**: one span per action, `info` on success with `resource`,
//!   `count` or `id` fields, `warn` on failure
//! - **Requests**: method, path and whether a bearer token was attached (`debug`)
//! - **Stale results**: responses dropped because a newer action started (`debug`)
//! - **Session**: sign-in, sign-out and restored sessions
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=hostel_client::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug`, write actions log their draft once on entry:
//!
//! ```text
//! DEBUG create_room: create_room called draft=RoomDraft { image: "", room_type: "double", price: 75.0, hotel_id: 3, is_available: true }
//! INFO create_room:create: Created resource="rooms"
//! INFO create_room:create: Loaded resource="rooms" count=4
//! ```
//!
//! Passwords are redacted in `Debug` output of the auth payloads.

/// Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
