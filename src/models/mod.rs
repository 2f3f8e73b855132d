//! Domain models: profiles, stored documents, and the dashboard view model.

pub mod dashboard;
pub mod document;
pub mod profile;
