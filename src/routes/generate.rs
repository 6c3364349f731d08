use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    AppState,
    delegates::error::{APIError, BlogError},
    generation::{BLOG_PARAMS, GenerationError, TextGenerator},
};

/// Body accepted by `POST /generate`. Extra fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerationRequest {
    #[schema(example = "The future of renewable energy")]
    pub topic: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct GenerationResponse {
    pub blog: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn extract_topic(json: &Value) -> Result<&str, BlogError> {
    json.get("topic")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .ok_or(BlogError::MissingTopic)
}

/// Turns a raw request body into a blog post using `generator`.
pub async fn generate_blog(
    generator: &dyn TextGenerator,
    body: &[u8],
) -> Result<GenerationResponse, BlogError> {
    let json: Value = serde_json::from_slice(body)?;
    let topic = extract_topic(&json)?;

    info!("Generating blog for topic {topic:?}");
    let sequences = generator.generate(topic, &BLOG_PARAMS).await?;

    let blog = sequences
        .into_iter()
        .next()
        .map(|sequence| sequence.generated_text)
        .ok_or(GenerationError::Empty)?;

    Ok(GenerationResponse { blog })
}

#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated blog post", body = GenerationResponse),
        (status = 400, description = "Topic missing or blank", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    ),
    tag = "Blog",
    description = "Generates a blog post for the given topic using a pretrained text-generation model."
)]
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerationResponse>, APIError> {
    let body = body.map_err(BlogError::from)?;
    Ok(Json(generate_blog(state.generator.as_ref(), &body).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GeneratedSequence, MockTextGenerator};

    fn never_called() -> MockTextGenerator {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().never();
        mock
    }

    #[tokio::test]
    async fn blank_topics_are_rejected_before_generation() {
        for body in [
            r#"{}"#,
            r#"{"topic": ""}"#,
            r#"{"topic": "   \n\t"}"#,
            r#"{"topic": 42}"#,
            r#"{"topic": null}"#,
            r#"["topic"]"#,
        ] {
            let err = generate_blog(&never_called(), body.as_bytes())
                .await
                .unwrap_err();
            assert!(matches!(err, BlogError::MissingTopic), "body {body}");
        }
    }

    #[tokio::test]
    async fn trimmed_topic_and_fixed_params_are_forwarded() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .withf(|prompt, params| prompt == "Rust in 2026" && *params == BLOG_PARAMS)
            .times(1)
            .returning(|_, _| Ok(vec![GeneratedSequence::new("Rust in 2026 is everywhere.")]));

        let body = br#"{"topic": "  Rust in 2026  ", "tone": "casual"}"#;
        let response = generate_blog(&mock, body).await.unwrap();
        assert_eq!(response.blog, "Rust in 2026 is everywhere.");
    }

    #[tokio::test]
    async fn only_the_first_sequence_is_returned() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_, _| {
            Ok(vec![
                GeneratedSequence::new("first"),
                GeneratedSequence::new("second"),
            ])
        });

        let response = generate_blog(&mock, br#"{"topic": "t"}"#).await.unwrap();
        assert_eq!(response.blog, "first");
    }

    #[tokio::test]
    async fn empty_output_is_a_generation_error() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().returning(|_, _| Ok(Vec::new()));

        let err = generate_blog(&mock, br#"{"topic": "t"}"#).await.unwrap_err();
        assert!(matches!(err, BlogError::Generation(GenerationError::Empty)));
    }

    #[tokio::test]
    async fn generator_failure_is_propagated() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .returning(|_, _| Err(GenerationError::Model("model unavailable".into())));

        let err = generate_blog(&mock, br#"{"topic": "t"}"#).await.unwrap_err();
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[tokio::test]
    async fn malformed_json_is_not_a_validation_error() {
        let err = generate_blog(&never_called(), b"{\"topic\": ").await.unwrap_err();
        assert!(matches!(err, BlogError::MalformedBody(_)));
    }
}
