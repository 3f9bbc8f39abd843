// file: src/server/handlers.rs
// description: HTTP route handlers for question answering and health
// reference: thin handlers delegating to the pipeline factory

use super::AppState;
use super::models::{AskRequest, AskResponse, ErrorResponse};
use crate::config::Config;
use crate::error::PipelineError;
use crate::utils::{HealthCheck, HealthReport, QUESTION_REQUIRED, Validator};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// POST `/api/ask/` - answers `{"question": "..."}` with `{"question", "answer"}`.
///
/// A missing, empty or unparseable body is answered with 400 before any
/// pipeline is built.
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let question = match payload {
        Ok(Json(request)) => request.question.unwrap_or_default(),
        Err(rejection) => {
            warn!("Rejected ask request body: {}", rejection);
            String::new()
        }
    };

    if Validator::validate_question(&question).is_err() {
        return error_response(StatusCode::BAD_REQUEST, QUESTION_REQUIRED);
    }

    let outcome = tokio::time::timeout(state.request_timeout, state.factory.run(&question)).await;

    match outcome {
        Ok(Ok(run)) => {
            info!("Run {} answered in {} ms", run.run_id, run.stats.total_duration_ms());
            Json(AskResponse {
                question,
                answer: run.answer,
            })
            .into_response()
        }
        Ok(Err(PipelineError::Validation(message))) => {
            error_response(StatusCode::BAD_REQUEST, message)
        }
        Ok(Err(PipelineError::Generation(e))) => {
            error!("Answer generation failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, format!("Generation failed: {}", e))
        }
        Ok(Err(e)) => {
            error!("Pipeline failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(_) => {
            error!(
                "Pipeline exceeded {}s request timeout",
                state.request_timeout.as_secs()
            );
            error_response(StatusCode::GATEWAY_TIMEOUT, "Timed out answering question")
        }
    }
}

/// GET `/api/health` - configuration level health, makes no outbound calls.
pub async fn health(State(state): State<AppState>) -> Response {
    let report = health_report(state.factory.config());
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}

pub fn health_report(config: &Config) -> HealthReport {
    let generation = match config.generation.require_api_key() {
        Ok(_) => HealthCheck::healthy("generation"),
        Err(e) => HealthCheck::unhealthy("generation", e.to_string()),
    };

    let literature = if config.literature.api_key.is_some() {
        HealthCheck::healthy("literature")
    } else {
        HealthCheck::degraded(
            "literature",
            "no NCBI api key, requests limited to 3 per second".to_string(),
        )
    };

    HealthReport::new(
        vec![generation, literature],
        env!("CARGO_PKG_VERSION").to_string(),
    )
}
