use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::completion::CompletionClient;
use crate::analysis::prompt::build_prompt;
use crate::analysis::score::extract_probability;
use crate::bail_analyzer;
use crate::error::AnalyzerResult;

pub mod completion;
pub mod prompt;
pub mod score;

/// Shorter inputs are rejected before any completion request is made. Counted in UTF-16 code
/// units, the unit browser clients measure text length in.
pub(crate) const MIN_TEXT_CHARS: usize = 20;

pub(crate) const TEXT_TOO_SHORT: &str = "Text too short";
pub(crate) const INVALID_BODY: &str = "Invalid request body";
pub(crate) const METHOD_NOT_ALLOWED: &str = "Method not allowed";

#[derive(Deserialize, Debug, Default)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct AnalyzeResponse {
    pub probability: u8,
}

/// The hosting independent handler. Adapters hand over the method and raw body and send back
/// whatever comes out.
#[derive(Clone)]
pub struct Analyzer {
    client: Arc<dyn CompletionClient>,
}

impl Analyzer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn respond(&self, method: &Method, body: &[u8]) -> AnalyzerResult<Response> {
        match *method {
            Method::OPTIONS => Ok(StatusCode::OK.into_response()),
            Method::POST => {
                let request = parse_request(body)?;
                let response = self.analyze(request).await?;
                Ok((StatusCode::OK, Json(response)).into_response())
            }
            _ => bail_analyzer!(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED),
        }
    }

    #[tracing::instrument(level = "info", skip_all)]
    pub async fn analyze(&self, request: AnalyzeRequest) -> AnalyzerResult<AnalyzeResponse> {
        let text = match request.text {
            Some(text) if text_length(&text) >= MIN_TEXT_CHARS => text,
            _ => bail_analyzer!(StatusCode::BAD_REQUEST, TEXT_TOO_SHORT),
        };

        let prompt = build_prompt(&text);
        let reply = self.client.complete(&prompt).await?;
        let probability = extract_probability(&reply)?;

        info!(probability, chars = text_length(&text), "Analyzed text");
        Ok(AnalyzeResponse { probability })
    }
}

fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

fn parse_request(body: &[u8]) -> AnalyzerResult<AnalyzeRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeRequest::default());
    }
    match Json::<AnalyzeRequest>::from_bytes(body) {
        Ok(Json(request)) => Ok(request),
        Err(_) => bail_analyzer!(StatusCode::BAD_REQUEST, INVALID_BODY),
    }
}
