//! State transitions of a [`Reservation`](crate::model::Reservation).
//!
//! Each transition is a server endpoint `PATCH {path}/{id}/{segment}`; the
//! resulting status is whatever the server reports on the next reload.

use crate::model::ReservationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    CheckIn,
    CheckOut,
}

impl ReservationAction {
    /// Last path segment of the transition endpoint.
    pub fn segment(self) -> &'static str {
        match self {
            ReservationAction::CheckIn => "check-in",
            ReservationAction::CheckOut => "check-out",
        }
    }

    /// Status the server is expected to report afterwards.
    pub fn target_status(self) -> ReservationStatus {
        match self {
            ReservationAction::CheckIn => ReservationStatus::CheckedIn,
            ReservationAction::CheckOut => ReservationStatus::CheckedOut,
        }
    }
}
