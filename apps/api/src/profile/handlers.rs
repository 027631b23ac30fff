//! HTTP handlers for profile upsert, fetch, and graduation outlook.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{GraduationOutlook, UserProfile};
use crate::state::AppState;
use crate::store::RecordClass;

#[derive(Debug, Serialize)]
pub struct ProfileSavedResponse {
    pub user_id: String,
    pub saved: bool,
}

/// POST /api/v1/profile
///
/// Upserts the profile under `profile:{user_id}`. Profiles never expire.
pub async fn upsert_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<ProfileSavedResponse>, AppError> {
    if profile.user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id is required".to_string()));
    }

    state
        .store
        .put(RecordClass::Profile, &profile.user_id, &profile)
        .await?;
    info!("Profile saved for user {}", profile.user_id);

    Ok(Json(ProfileSavedResponse {
        user_id: profile.user_id,
        saved: true,
    }))
}

/// GET /api/v1/profile/:user_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile: Option<UserProfile> = state.store.get(RecordClass::Profile, &user_id).await?;
    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("profile {user_id} not found")))
}

#[derive(Debug, Serialize)]
pub struct OutlookResponse {
    pub user_id: String,
    pub graduation_date: Option<NaiveDate>,
    /// None when the profile has no graduation date set.
    pub outlook: Option<GraduationOutlook>,
}

/// GET /api/v1/profile/:user_id/outlook
pub async fn get_outlook(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<OutlookResponse>, AppError> {
    let profile: Option<UserProfile> = state.store.get(RecordClass::Profile, &user_id).await?;
    let profile =
        profile.ok_or_else(|| AppError::NotFound(format!("profile {user_id} not found")))?;

    let today = Utc::now().date_naive();
    Ok(Json(OutlookResponse {
        outlook: profile.graduation_outlook(today),
        graduation_date: profile.graduation_date,
        user_id: profile.user_id,
    }))
}
