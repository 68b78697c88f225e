//! Domain records and their write payloads.
//!
//! Records implement [`Resource`](crate::framework::Resource) in the
//! `entity.rs` of their store module; this module only holds the data.

pub mod hotel;
mod nullable;
pub mod reservation;
pub mod room;
pub mod subscription;
pub mod user;

pub use hotel::*;
pub use reservation::*;
pub use room::*;
pub use subscription::*;
pub use user::*;
