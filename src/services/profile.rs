//! Profile lookup backing the session provider.

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::store::{DocumentStore, USERS};

/// Read the profile document for `uid`.
pub async fn load_profile<S: DocumentStore>(store: &S, uid: &str) -> Result<Profile, AppError> {
    let doc = store
        .get(USERS, uid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("profile {uid}")))?;
    Ok(Profile::from_document(&doc)?)
}

/// Resolve the current profile, treating lookup failures as "signed out".
pub async fn current_profile<S: DocumentStore>(store: &S, uid: Option<&str>) -> Option<Profile> {
    let uid = uid?;
    match load_profile(store, uid).await {
        Ok(profile) => Some(profile),
        Err(e) if e.is_not_found() => {
            tracing::debug!(uid, "No profile document for token subject");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, uid, "Profile lookup failed");
            None
        }
    }
}
