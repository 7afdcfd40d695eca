/// Gemini API 客户端
///
/// 通过 REST `generateContent` 接口调用远程模型
use crate::clients::generator::{GenerationRequest, TextGenerator};
use crate::clients::response::{extract_answer, Answer, GenerateContentResponse};
use crate::config::Config;
use crate::error::LlmError;
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

/// Gemini 客户端
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    ///
    /// 密钥由 [`Config::validate`] 负责检查
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model_name: config.model_name.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model_name
        )
    }

    /// 发送请求并解析响应体
    async fn send(&self, request: &GenerationRequest) -> Result<GenerateContentResponse, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                warn!("LLM API 调用失败: {}", source);
                LlmError::RequestFailed {
                    model: self.model_name.clone(),
                    source,
                }
            })?;

        let status = response.status();
        let raw = response.text().await.map_err(|source| LlmError::RequestFailed {
            model: self.model_name.clone(),
            source,
        })?;

        if !status.is_success() {
            warn!("LLM API 返回错误状态: {}", status);
            return Err(LlmError::BadResponse {
                model: self.model_name.clone(),
                status: status.as_u16(),
                body: truncate_text(&raw, 500),
            });
        }

        serde_json::from_str(&raw).map_err(|source| LlmError::InvalidResponse {
            model: self.model_name.clone(),
            source,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        debug!(
            "调用 LLM API，模型: {}, 温度: {}, 输出上限: {}",
            self.model_name, request.temperature, request.max_output_tokens
        );
        debug!("提示词: {}", truncate_text(&request.prompt, 120));

        let response = self.send(request).await?;

        // 诊断信息只记录，不影响提取
        if let Some(feedback) = &response.prompt_feedback {
            debug!("Prompt feedback: {}", feedback);
        }
        if let Some(reason) = response.first_finish_reason() {
            debug!("Finish reason: {}", reason);
        }

        let answer = extract_answer(&response);
        if answer == Answer::NoOutput {
            warn!("⚠️ 模型未返回可用文本 (finish reason: {:?})", response.first_finish_reason());
        }

        Ok(answer.into_text())
    }
}
