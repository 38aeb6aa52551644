//! Mock provider implementations for testing.
//!
//! In-memory implementations of every provider trait, plus
//! [`MockBookingWorld`], which wires them together the way the server wires
//! the `PostgreSQL` adapters.

pub mod booking;
pub mod enrollment;
pub mod room;
pub mod session;
pub mod world;

pub use booking::MockBookingStore;
pub use enrollment::MockEnrollmentProvider;
pub use room::MockRoomCatalog;
pub use session::MockSessionStore;
pub use world::{MockBookingEngine, MockBookingWorld};

use hotel_booking_core::BookingError;

fn poisoned<T>(_: std::sync::PoisonError<T>) -> BookingError {
    BookingError::Storage("mock lock poisoned".to_string())
}
