//! Single-slot dashboard state refreshed on profile changes.
//!
//! Fetch failures never reach the caller: they are logged and the slot keeps
//! its previous stats (all zeros before the first success). Overlapping
//! refreshes are not cancelled; whichever resolves last wins.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

use crate::models::dashboard::{DashboardLayout, DashboardStats};
use crate::models::profile::{Profile, Role};
use crate::services::{dashboard, layout};
use crate::store::DocumentStore;

#[derive(Debug, Default)]
struct SlotState {
    role: Option<Role>,
    stats: DashboardStats,
}

/// Shared handle to one dashboard's view model.
#[derive(Debug, Clone, Default)]
pub struct DashboardSlot {
    state: Arc<RwLock<SlotState>>,
}

impl DashboardSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully computed stats.
    pub async fn stats(&self) -> DashboardStats {
        self.state.read().await.stats.clone()
    }

    /// Renderable dashboard, or `None` while no profile is present.
    pub async fn layout(&self) -> Option<DashboardLayout> {
        let state = self.state.read().await;
        state.role.map(|role| layout::build(role, state.stats.clone()))
    }

    /// Recompute stats for `profile`. Returns whether the slot was updated.
    pub async fn refresh<S: DocumentStore>(&self, store: &S, profile: Option<&Profile>) -> bool {
        self.state.write().await.role = profile.map(|p| p.role);

        match dashboard::fetch_stats(store, profile).await {
            Ok(Some(stats)) => {
                self.state.write().await.stats = stats;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    uid = profile.map(|p| p.uid.as_str()).unwrap_or_default(),
                    "Dashboard fetch failed; keeping previous stats"
                );
                false
            }
        }
    }

    /// Re-run [`refresh`](Self::refresh) whenever the watched profile
    /// changes, including its initial value. Each change gets its own task.
    pub fn watch_profile<S>(
        &self,
        store: Arc<S>,
        mut profiles: watch::Receiver<Option<Profile>>,
    ) -> JoinHandle<()>
    where
        S: DocumentStore + 'static,
    {
        let slot = self.clone();
        tokio::spawn(async move {
            let mut seen: Option<Option<Profile>> = None;
            loop {
                let profile = profiles.borrow_and_update().clone();
                if seen.as_ref() != Some(&profile) {
                    seen = Some(profile.clone());
                    let slot = slot.clone();
                    let store = Arc::clone(&store);
                    tokio::spawn(async move {
                        slot.refresh(store.as_ref(), profile.as_ref()).await;
                    });
                }
                if profiles.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
