use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    activity_detail, create_activity, delete_activity, edit_activity_form, index,
    legacy_edit_activity, legacy_new_activity, legacy_view_activity, new_activity_form,
    update_activity,
};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/activities/new", get(new_activity_form).post(create_activity))
        .route("/activities/:id", get(activity_detail))
        .route(
            "/activities/:id/edit",
            get(edit_activity_form).post(update_activity),
        )
        .route("/activities/:id/delete", post(delete_activity))
        .route("/add-activity", get(legacy_new_activity))
        .route("/add-edit-activity", get(legacy_new_activity))
        .route("/edit-activity/:id", get(legacy_edit_activity))
        .route("/view-activity/:id", get(legacy_view_activity))
        .nest_service("/static", ServeDir::new(static_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn static_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static")
}
