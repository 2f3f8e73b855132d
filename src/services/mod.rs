//! Business logic layer.

pub mod auth;
pub mod dashboard;
pub mod layout;
pub mod profile;
pub mod slot;
