use crate::notice::{GENERATE_TRANSPORT_PREFIX, Notice};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskInputError {
    #[error("task description must not be empty")]
    EmptyTaskDescription,
}

/// Checks the generate-click input constraint: the trimmed description must
/// be non-empty. The input is returned untrimmed; the request carries the
/// user's text verbatim.
pub fn validate_task_description(raw: &str) -> Result<&str, TaskInputError> {
    if raw.trim().is_empty() {
        return Err(TaskInputError::EmptyTaskDescription);
    }
    Ok(raw)
}

/// Terminal result of one guide fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideOutcome {
    Loaded { content: String },
    /// Network error, non-2xx status, or undecodable body. The detail is for
    /// the operator diagnostic only; the page shows the fixed failure text.
    Unavailable { detail: String },
}

pub fn render_guide_outcome(outcome: &GuideOutcome) -> String {
    match outcome {
        GuideOutcome::Loaded { content } => content.clone(),
        GuideOutcome::Unavailable { .. } => Notice::GuideLoadFailed.text().to_string(),
    }
}

/// Terminal result of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// 2xx response; the code field may still be absent or empty.
    Completed { code: Option<String> },
    /// Non-2xx response. The body is not inspected.
    RequestFailed { status: u16 },
    /// Transport-level failure: network error or a 2xx body that did not
    /// decode. The detail is appended to the failure placeholder.
    TransportFailed { detail: String },
}

pub fn render_generate_outcome(outcome: &GenerateOutcome) -> String {
    match outcome {
        GenerateOutcome::Completed { code: Some(code) } if !code.is_empty() => code.clone(),
        GenerateOutcome::Completed { .. } | GenerateOutcome::RequestFailed { .. } => {
            Notice::GenerateFailed.text().to_string()
        }
        GenerateOutcome::TransportFailed { detail } => {
            format!("{GENERATE_TRANSPORT_PREFIX}{detail}")
        }
    }
}

/// Monotonic ticket counter for generation requests. Overlapping requests are
/// not cancelled; instead a response only renders while its ticket is still
/// the most recently issued one, so a stale response can never overwrite a
/// newer request's placeholder or result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    issued: u64,
}

impl RequestSequencer {
    #[must_use]
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.issued
    }
}
