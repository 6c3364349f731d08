use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::generation::TextGenerator;

pub mod config;
pub mod generation;

pub mod delegates {
    pub mod error;
}

pub mod docs {
    pub mod handlers;
}

pub mod pages {
    pub mod index;
}

pub mod routes {
    pub mod generate;
    pub mod model;
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Generator",
        description = "Generates blog posts from a topic with a pretrained text-generation model."
    ),
    paths(
        routes::generate::generate,
        routes::model::get_model,
        pages::index::index,
    ),
    components(schemas(
        routes::generate::GenerationRequest,
        routes::generate::GenerationResponse,
        routes::generate::ErrorResponse,
    )),
    tags(
        (name = "Blog", description = "Blog post generation"),
        (name = "Info", description = "Service information")
    )
)]
pub struct ApiDoc;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub model_id: Arc<str>,
    pub public_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, model_id: impl Into<Arc<str>>) -> Self {
        Self {
            generator,
            model_id: model_id.into(),
            public_url: None,
        }
    }

    pub fn with_public_url(mut self, url: Option<String>) -> Self {
        self.public_url = url.map(Arc::from);
        self
    }
}

/// Any origin, method and header is allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index::index))
        .route(
            "/generate",
            post(routes::generate::generate).layer(DefaultBodyLimit::disable()),
        )
        .route("/model", get(routes::model::get_model))
        .route("/docs", get(docs::handlers::docs))
        .route("/openapi.json", get(docs::handlers::openapi))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
