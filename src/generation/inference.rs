use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use super::{GeneratedSequence, GenerationError, GenerationParams, TextGenerator};

/// Client for a Hugging Face style text-generation endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct InferenceParameters<'a> {
    #[serde(flatten)]
    params: &'a GenerationParams,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters<'a>,
    options: serde_json::Value,
}

#[derive(Deserialize)]
struct UpstreamError {
    error: String,
}

impl InferenceClient {
    pub fn new(
        inference_url: &str,
        model_id: &str,
        token: Option<&str>,
    ) -> Result<Self, GenerationError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = token {
            let mut bearer = header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| GenerationError::Model(format!("invalid token: {e}")))?;
            bearer.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, bearer);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/{}", inference_url.trim_end_matches('/'), model_id),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn request_body<'a>(prompt: &'a str, params: &'a GenerationParams) -> InferenceRequest<'a> {
    InferenceRequest {
        inputs: prompt,
        parameters: InferenceParameters {
            params,
            do_sample: true,
            return_full_text: true,
        },
        options: json!({ "wait_for_model": true }),
    }
}

fn parse_response(
    status: StatusCode,
    body: &[u8],
) -> Result<Vec<GeneratedSequence>, GenerationError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<UpstreamError>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(|reason| format!("{} {reason}", status.as_u16()))
                    .unwrap_or_else(|| status.to_string())
            });
        return Err(GenerationError::Model(message));
    }

    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<GeneratedSequence>, GenerationError> {
        debug!("Forwarding prompt to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body(prompt, params))
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        parse_response(status, &body).inspect_err(|e| {
            error!("Inference request to {} failed: {e}", self.endpoint);
        })
    }
}
