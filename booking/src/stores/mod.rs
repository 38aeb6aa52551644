//! Storage adapters.
//!
//! In-memory implementations live in `crate::mocks` (feature `test-utils`).

#[cfg(feature = "postgres")]
pub mod postgres;
