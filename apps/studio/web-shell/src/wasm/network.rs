use super::*;

use gloo_net::http::Request;
use pipeforge_client_core::protocol::{
    GENERATE_CODE_ENDPOINT, GenerateCodeRequest, GenerateCodeResponse, TOOL_GUIDE_ENDPOINT,
    ToolGuideResponse,
};

/// One read of the guide endpoint. Every failure mode (network, status,
/// decode) folds into `GuideOutcome::Unavailable`; there is no retry.
pub(super) async fn fetch_tool_guide() -> GuideOutcome {
    let response = match Request::get(TOOL_GUIDE_ENDPOINT).send().await {
        Ok(response) => response,
        Err(error) => {
            return GuideOutcome::Unavailable {
                detail: error.to_string(),
            };
        }
    };

    let status = response.status();
    if !(200..=299).contains(&status) {
        return GuideOutcome::Unavailable {
            detail: format!("request failed with status {status}"),
        };
    }

    let raw = match response.text().await {
        Ok(raw) => raw,
        Err(error) => {
            return GuideOutcome::Unavailable {
                detail: error.to_string(),
            };
        }
    };
    match serde_json::from_str::<ToolGuideResponse>(&raw) {
        Ok(body) => GuideOutcome::Loaded {
            content: body.content,
        },
        Err(error) => GuideOutcome::Unavailable {
            detail: error.to_string(),
        },
    }
}

/// One generation request. A non-2xx status is reported without reading the
/// body; transport and decode failures carry the error description through to
/// the rendered placeholder.
pub(super) async fn post_generate_code(task_description: &str) -> GenerateOutcome {
    let body = match serde_json::to_string(&GenerateCodeRequest {
        task_description: task_description.to_string(),
    }) {
        Ok(body) => body,
        Err(error) => {
            return GenerateOutcome::TransportFailed {
                detail: format!("failed to serialize request body: {error}"),
            };
        }
    };

    let request = match Request::post(GENERATE_CODE_ENDPOINT)
        .header("content-type", "application/json")
        .body(body)
    {
        Ok(request) => request,
        Err(error) => {
            return GenerateOutcome::TransportFailed {
                detail: error.to_string(),
            };
        }
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(error) => {
            return GenerateOutcome::TransportFailed {
                detail: error.to_string(),
            };
        }
    };

    let status = response.status();
    if !(200..=299).contains(&status) {
        return GenerateOutcome::RequestFailed { status };
    }

    let raw = match response.text().await {
        Ok(raw) => raw,
        Err(error) => {
            return GenerateOutcome::TransportFailed {
                detail: error.to_string(),
            };
        }
    };
    match serde_json::from_str::<GenerateCodeResponse>(&raw) {
        Ok(body) => GenerateOutcome::Completed { code: body.code },
        Err(error) => GenerateOutcome::TransportFailed {
            detail: format!("failed to decode response: {error}"),
        },
    }
}
