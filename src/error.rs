use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

pub(crate) const ANALYSIS_FAILED: &str = "Analysis failed";
pub(crate) const ANALYSIS_TIMED_OUT: &str = "Analysis timed out";

// Taken from https://github.com/tokio-rs/axum/blob/main/examples/anyhow-error-response/src/main.rs
#[derive(Debug)]
pub struct AnalyzerError {
    pub status: StatusCode,
    pub message: HttpErrorResponse,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HttpErrorResponse {
    pub error: String,
}

impl From<&str> for HttpErrorResponse {
    fn from(message: &str) -> Self {
        HttpErrorResponse {
            error: message.to_string(),
        }
    }
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let mut res = Json(self.message).into_response();
        *res.status_mut() = self.status;
        res
    }
}

/// Anything propagated with `?` ends up here. The cause is logged and the caller only ever sees
/// a generic message.
impl<E> From<E> for AnalyzerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        if is_timeout(&err) {
            warn!("Analysis timed out: {:#}", err);
            return AnalyzerError {
                status: StatusCode::GATEWAY_TIMEOUT,
                message: HttpErrorResponse::from(ANALYSIS_TIMED_OUT),
            };
        }

        error!("Analysis error: {:#}", err);
        AnalyzerError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: HttpErrorResponse::from(ANALYSIS_FAILED),
        }
    }
}

fn is_timeout(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .is_some_and(reqwest::Error::is_timeout)
    })
}

pub type AnalyzerResult<T, E = AnalyzerError> = Result<T, E>;

#[macro_export]
macro_rules! bail_analyzer {
    ($status_code:expr, $error_message:expr) => {
        return Err($crate::error::AnalyzerError {
            status: $status_code,
            message: $crate::error::HttpErrorResponse::from($error_message),
        })
    };
}
