//! HTTP handlers shared by every deployment.

pub mod health;
