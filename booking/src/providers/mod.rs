//! Booking providers.
//!
//! Traits for every external dependency of the booking engine and the HTTP
//! layer. The engine depends on these traits; the caller injects concrete
//! implementations:
//!
//! - **Testing**: in-memory mocks (`crate::mocks`), deterministic
//! - **Production**: `PostgreSQL` adapters (`crate::stores::postgres`)
//!
//! ```text
//! Read-only (owned elsewhere):        Written by this service:
//! ┌────────────────────┐              ┌────────────────────┐
//! │ EnrollmentProvider │              │ BookingStore       │
//! │ RoomCatalog        │              │ - guarded create   │
//! │ SessionStore       │              │ - atomic replace   │
//! └────────────────────┘              └────────────────────┘
//! ```

pub mod booking;
pub mod enrollment;
pub mod room;
pub mod session;

pub use booking::BookingStore;
pub use enrollment::EnrollmentProvider;
pub use room::RoomCatalog;
pub use session::{Session, SessionStore};
