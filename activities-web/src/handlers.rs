use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::client::ClientError;
use crate::form::{ActivityForm, FormMode, SAVE_FAILED};
use crate::listing::group_by_day;
use crate::models::ListQuery;
use crate::state::AppState;
use crate::templates::{ActivitiesTemplate, DetailTemplate, FormTemplate, MessageTemplate};

pub const FETCH_FAILED: &str = "Failed to fetch activities.";
pub const NOT_FOUND: &str = "Activity not found.";
pub const DETAIL_FAILED: &str = "Error fetching activity. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete activity.";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, MessageTemplate::new(text)).into_response()
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

pub async fn index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let today = today();

    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(e) => {
            let page = ActivitiesTemplate::new(&query, today, &[], e);
            return (StatusCode::BAD_REQUEST, page).into_response();
        }
    };

    match state.client.list(&filter).await {
        Ok(activities) => {
            let groups = group_by_day(activities);
            ActivitiesTemplate::new(&query, today, &groups, "").into_response()
        }
        Err(e) => {
            error!("Failed to fetch activities: {}", e);
            let page = ActivitiesTemplate::new(&query, today, &[], FETCH_FAILED);
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
    }
}

/// Delete, then send the browser back to the same list so it re-fetches.
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return message(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match state.client.delete(id).await {
        Ok(()) => info!("Deleted activity {}", id),
        Err(ClientError::NotFound) => warn!("Activity {} was already gone", id),
        Err(e) => {
            error!("Failed to delete activity {}: {}", id, e);
            return message(StatusCode::BAD_GATEWAY, DELETE_FAILED);
        }
    }

    Redirect::to(&query.href()).into_response()
}

pub async fn activity_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return message(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match state.client.get(id).await {
        Ok(Some(activity)) => DetailTemplate::new(&activity).into_response(),
        Ok(None) => message(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            error!("Failed to fetch activity {}: {}", id, e);
            message(StatusCode::BAD_GATEWAY, DETAIL_FAILED)
        }
    }
}

pub async fn new_activity_form() -> Response {
    FormTemplate::new(FormMode::Create, ActivityForm::default(), "").into_response()
}

pub async fn create_activity(
    State(state): State<AppState>,
    Form(form): Form<ActivityForm>,
) -> Response {
    submit(&state, FormMode::Create, form).await
}

pub async fn edit_activity_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return message(StatusCode::NOT_FOUND, NOT_FOUND);
    };

    match state.client.get(id).await {
        Ok(Some(activity)) => FormTemplate::new(
            FormMode::Edit(id),
            ActivityForm::from_activity(&activity),
            "",
        )
        .into_response(),
        Ok(None) => message(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            error!("Failed to load activity {} for editing: {}", id, e);
            message(StatusCode::BAD_GATEWAY, DETAIL_FAILED)
        }
    }
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ActivityForm>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return message(StatusCode::NOT_FOUND, NOT_FOUND);
    };
    submit(&state, FormMode::Edit(id), form).await
}

/// Save the form. On any failure the form comes back with what was typed.
async fn submit(state: &AppState, mode: FormMode, form: ActivityForm) -> Response {
    let input = match form.to_input(mode.id()) {
        Ok(input) => input,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, FormTemplate::new(mode, form, e.to_string()))
                .into_response()
        }
    };

    let saved = match mode {
        FormMode::Create => state.client.create(&input).await.map(|activity| {
            info!("Created activity {}", activity.id);
        }),
        FormMode::Edit(id) => state.client.update(id, &input).await.map(|()| {
            info!("Updated activity {}", id);
        }),
    };

    match saved {
        Ok(()) => Redirect::to("/").into_response(),
        Err(ClientError::NotFound) => message(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(e) => {
            error!("Failed to save activity: {}", e);
            let status = match e {
                ClientError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, FormTemplate::new(mode, form, SAVE_FAILED)).into_response()
        }
    }
}

pub async fn legacy_new_activity() -> Redirect {
    Redirect::permanent("/activities/new")
}

pub async fn legacy_edit_activity(Path(id): Path<String>) -> Response {
    match parse_id(&id) {
        Some(id) => Redirect::permanent(&format!("/activities/{id}/edit")).into_response(),
        None => message(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

pub async fn legacy_view_activity(Path(id): Path<String>) -> Response {
    match parse_id(&id) {
        Some(id) => Redirect::permanent(&format!("/activities/{id}")).into_response(),
        None => message(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}
