use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

const SYSTEM_PROMPT: &str =
    "你是一个Python编程专家，专门帮助用户生成基于特定工具库的数据处理代码。";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation upstream api key is not configured")]
    MissingApiKey,
    #[error("failed to reach generation upstream: {0}")]
    Network(String),
    #[error("generation upstream returned status {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("failed to decode generation upstream response: {0}")]
    Decode(String),
}

/// Seam between the generate-code route and whatever produces the code.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(&self, guide: &str, task_description: &str)
    -> Result<String, GenerateError>;
}

/// Assembles the upstream user prompt from the guide text and the task.
pub fn build_prompt(guide: &str, task_description: &str) -> String {
    format!(
        "请使用我提供的工具库编写一个数据处理流水线：\n\n\
         【工具库说明】\n{guide}\n\n\
         【任务要求】\n{task_description}\n\n\
         请确保包含适当的错误处理和资源清理。\n\n\
         请只返回可执行的Python代码，不需要任何解释或额外文本。\n"
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    // Qwen-style switch; OpenAI-compatible servers ignore unknown fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_thinking: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Calls an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiCompatGenerator {
    pub fn from_config(config: &Config) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_seconds))
            .build()
            .map_err(|error| GenerateError::Network(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            api_key: config.upstream_api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl CodeGenerator for OpenAiCompatGenerator {
    async fn generate(
        &self,
        guide: &str,
        task_description: &str,
    ) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(guide, task_description),
                },
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            enable_thinking: Some(false),
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, "requesting code generation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|error| GenerateError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|error| GenerateError::Decode(error.to_string()))?;

        let code = chat
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();
        Ok(strip_code_fences(&code))
    }
}

/// Deterministic generator selected by `mock` mode; used by the router tests
/// and local demos without an upstream.
#[derive(Debug, Clone, Default)]
pub struct CannedGenerator;

#[async_trait]
impl CodeGenerator for CannedGenerator {
    async fn generate(
        &self,
        _guide: &str,
        task_description: &str,
    ) -> Result<String, GenerateError> {
        Ok(format!(
            "# pipeline for: {}\nprint(\"pipeline ready\")\n",
            task_description.trim()
        ))
    }
}

/// Models often wrap code in a markdown fence despite being told not to.
fn strip_code_fences(code: &str) -> String {
    let code = code.trim();
    if code.starts_with("```") && code.ends_with("```") {
        let lines: Vec<&str> = code.lines().collect();
        if lines.len() >= 2 {
            return lines[1..lines.len() - 1].join("\n");
        }
    }
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_prompt_embeds_guide_and_task() {
        let prompt = build_prompt("- mysql_util", "统计日活跃用户");
        assert!(prompt.contains("【工具库说明】\n- mysql_util"));
        assert!(prompt.contains("【任务要求】\n统计日活跃用户"));
        assert!(prompt.contains("请只返回可执行的Python代码"));
    }

    #[test]
    fn strip_code_fences_unwraps_fenced_block() {
        let input = "```python\nprint(1)\n```";
        assert_eq!(strip_code_fences(input), "print(1)");
    }

    #[test]
    fn strip_code_fences_keeps_plain_code() {
        assert_eq!(strip_code_fences("print(1)\n"), "print(1)");
    }

    #[tokio::test]
    async fn canned_generator_embeds_trimmed_task() -> anyhow::Result<()> {
        let code = CannedGenerator.generate("guide", "  add two numbers  ").await?;
        assert!(code.starts_with("# pipeline for: add two numbers\n"));
        Ok(())
    }

    #[tokio::test]
    async fn openai_generator_requires_api_key() {
        let config = Config::for_tests("static".into(), "guide.md".into());
        let generator = OpenAiCompatGenerator::from_config(&config).expect("generator");
        let error = generator
            .generate("guide", "task")
            .await
            .expect_err("expected missing key error");
        assert!(matches!(error, GenerateError::MissingApiKey));
    }
}
