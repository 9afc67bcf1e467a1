use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod generator;
pub mod guide;
pub mod pages;


use pipeforge_client_core::controller::validate_task_description;
use pipeforge_client_core::protocol::{
    ApiErrorBody, GENERATE_CODE_ENDPOINT, GenerateCodeRequest, GenerateCodeResponse,
    TOOL_GUIDE_ENDPOINT, ToolGuideResponse,
};

use crate::config::{Config, GENERATOR_MODE_MOCK};
use crate::generator::{CannedGenerator, CodeGenerator, GenerateError, OpenAiCompatGenerator};

const SERVICE_NAME: &str = "pipeforge-studio-service";
const EMPTY_TASK_ERROR: &str = "任务描述不能为空";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn CodeGenerator>,
}

/// Builds the router with the generator the config selects: `mock` gets the
/// canned generator, anything else the OpenAI-compatible upstream client.
pub fn build_router(config: Config) -> Result<Router, GenerateError> {
    let generator: Arc<dyn CodeGenerator> = if config.generator_mode == GENERATOR_MODE_MOCK {
        Arc::new(CannedGenerator)
    } else {
        Arc::new(OpenAiCompatGenerator::from_config(&config)?)
    };
    Ok(build_router_with_generator(config, generator))
}

pub fn build_router_with_generator(
    config: Config,
    generator: Arc<dyn CodeGenerator>,
) -> Router {
    let state = AppState {
        config: Arc::new(config),
        generator,
    };

    Router::new()
        .route("/", get(studio_page))
        .route("/healthz", get(health))
        .route("/readyz", get(readiness))
        .route(TOOL_GUIDE_ENDPOINT, get(tool_guide))
        .route(GENERATE_CODE_ENDPOINT, post(generate_code))
        .route("/assets/*path", get(static_asset))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

async fn studio_page() -> Html<String> {
    Html(pages::render_studio_page())
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "generator_mode": state.config.generator_mode,
    }))
}

async fn readiness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ready" }))
}

async fn tool_guide(State(state): State<AppState>) -> Json<ToolGuideResponse> {
    let content = guide::load_tool_guide(&state.config.guide_path);
    Json(ToolGuideResponse { content })
}

async fn generate_code(
    State(state): State<AppState>,
    Json(request): Json<GenerateCodeRequest>,
) -> Response {
    if validate_task_description(&request.task_description).is_err() {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, EMPTY_TASK_ERROR);
    }

    let guide = guide::load_tool_guide(&state.config.guide_path);
    match state
        .generator
        .generate(&guide, &request.task_description)
        .await
    {
        Ok(code) => Json(GenerateCodeResponse { code: Some(code) }).into_response(),
        Err(error) => {
            tracing::error!(%error, "code generation failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
        }
    }
}

async fn static_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    if path.split('/').any(|segment| segment == "..") {
        return api_error(StatusCode::NOT_FOUND, "asset not found");
    }

    let full_path = state.config.static_dir.join(&path);
    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&full_path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.to_string())],
                bytes,
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!(path = %full_path.display(), %error, "asset read failed");
            api_error(StatusCode::NOT_FOUND, "asset not found")
        }
    }
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}
