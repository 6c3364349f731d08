use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use maud::html;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", body = String)
    ),
    tag = "Info"
)]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        html! {
            html lang="en" {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    title { "AI Blog Generator" }
                }
                body {
                    header {
                        h1 { "AI Blog Generator" }
                        p {
                            "Send a topic to "
                            code { "/generate" }
                            " and get back a blog post written by "
                            b { code { (&*state.model_id) } }
                            "."
                        }
                    }
                    section {
                        h2 { "Usage" }
                        pre {
                            code {
                                "curl -X POST http://localhost:5000/generate \\\n"
                                "    -H \"Content-Type: application/json\" \\\n"
                                "    -d '{\"topic\": \"The future of renewable energy\"}'"
                            }
                        }
                        p {
                            "Example response: "
                            code { "{\"blog\": \"The future of renewable energy is bright...\"}" }
                        }
                        p {
                            "A missing or blank topic returns "
                            code { "400" }
                            " with "
                            code { "{\"error\": \"Topic is required\"}" }
                            "."
                        }
                    }
                    section {
                        h2 { "Docs" }
                        p {
                            a href="/docs" { "Link" }
                        }
                    }
                }
            }
        }
        .into_string(),
    )
}
