//! REST handlers for `/api/activities`.
//!
//! Each handler validates its path/query/body shape, performs exactly one
//! storage operation and maps the outcome to a status code.

use crate::constants::activity_location;
use crate::error::{ApiError, Result};
use activities_core::storage::Storage;
use activities_core::{Activity, ActivityFilter, ActivityInput};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, rejection::QueryRejection, FromRequest, Path, Query, Request, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Shared handler state. Storage is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

/// Query string of `GET /api/activities`. The capitalised aliases are what
/// the first frontend sent.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(alias = "Date")]
    pub date: Option<String>,
    #[serde(alias = "Category")]
    pub category: Option<String>,
    #[serde(alias = "City")]
    pub city: Option<String>,
}

/// JSON body extractor whose rejection is a 400 with our error body.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("Invalid activity id: {raw}")))
}

/// GET /api/activities
pub async fn list_activities(
    State(state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Activity>>> {
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
    let filter = ActivityFilter::from_params(
        params.date.as_deref(),
        params.category.as_deref(),
        params.city.as_deref(),
    )?;

    let activities = state.storage.list(&filter).await?;
    debug!("Returning {} activities", activities.len());
    Ok(Json(activities))
}

/// GET /api/activities/:id
pub async fn get_activity(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Activity>> {
    let id = parse_id(&raw_id)?;
    state
        .storage
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/activities
pub async fn create_activity(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ActivityInput>,
) -> Result<impl IntoResponse> {
    let activity = state.storage.insert(input).await?;
    info!("Created activity {}", activity.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, activity_location(&activity.id))],
        Json(activity),
    ))
}

/// PUT /api/activities/:id
///
/// The body must carry the same `id` as the path.
pub async fn update_activity(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(input): JsonBody<ActivityInput>,
) -> Result<StatusCode> {
    let id = parse_id(&raw_id)?;
    if input.id != Some(id) {
        return Err(ApiError::Validation("ID mismatch".to_string()));
    }

    state
        .storage
        .replace(id, input)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!("Updated activity {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/activities/:id
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&raw_id)?;
    if !state.storage.delete(id).await? {
        return Err(ApiError::NotFound);
    }

    info!("Deleted activity {}", id);
    Ok(StatusCode::NO_CONTENT)
}
