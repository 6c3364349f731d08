use axum::{extract::State, response::IntoResponse};

use crate::AppState;

#[utoipa::path(
    get,
    path = "/model",
    responses(
        (status = 200, description = "Identifier of the text-generation model in use", content_type = "text/plain")
    ),
    tag = "Info"
)]
pub async fn get_model(State(state): State<AppState>) -> impl IntoResponse {
    state.model_id.to_string()
}
