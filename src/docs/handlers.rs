use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};
use maud::html;
use utoipa::{OpenApi, openapi::ServerBuilder};

use crate::{ApiDoc, AppState};

pub async fn docs(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        html! {
            html lang="en" {
                head {
                    meta charset="UTF-8" {}
                    title { "Blog Generator API (" (&*state.model_id) ")" }
                    script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference" {}
                }
                body {
                    noscript {
                        p {
                            "The API reference needs JavaScript. The raw document is at "
                            a href="/openapi.json" { "/openapi.json" }
                            "."
                        }
                    }
                    div id="app" {}
                    script {
                        "Scalar.createApiReference('#app', { url: '/openapi.json', hideDownloadButton: true, hideClientButton: true });"
                    }
                }
            }
        }
        .into_string(),
    )
}

pub async fn openapi(State(state): State<AppState>) -> impl IntoResponse {
    let mut openapi = ApiDoc::openapi();
    if let Some(url) = state.public_url.as_deref() {
        openapi.servers = Some(vec![
            ServerBuilder::new()
                .url(url)
                .description(Some("Production"))
                .build(),
        ]);
    }
    Json(openapi)
}
