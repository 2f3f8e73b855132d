//! Dashboard routes: role-based statistics for the signed-in user.
//!
//! Store failures are logged and degrade to the zeroed dashboard rather than
//! an error response. No signed-in profile yields `data: null`.

use axum::{extract::State, Json};

use crate::errors::ApiResponse;
use crate::middleware::auth::CurrentUser;
use crate::models::dashboard::{DashboardLayout, DashboardStats};
use crate::services::profile;
use crate::services::slot::DashboardSlot;
use crate::AppState;

async fn render(state: &AppState, user: Option<CurrentUser>) -> DashboardSlot {
    let profile =
        profile::current_profile(&state.documents, user.as_ref().map(|u| u.uid.as_str())).await;
    let slot = DashboardSlot::new();
    slot.refresh(&state.documents, profile.as_ref()).await;
    slot
}

/// GET /api/v1/dashboard — cards, charts, and activity for the caller.
pub async fn layout(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
) -> Json<ApiResponse<DashboardLayout>> {
    match render(&state, user).await.layout().await {
        Some(layout) => ApiResponse::success(layout),
        None => ApiResponse::empty(),
    }
}

/// GET /api/v1/dashboard/stats — raw view-model counts for the caller.
pub async fn stats(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
) -> Json<ApiResponse<DashboardStats>> {
    let slot = render(&state, user).await;
    match slot.layout().await {
        Some(layout) => ApiResponse::success(layout.stats),
        None => ApiResponse::empty(),
    }
}
