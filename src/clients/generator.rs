//! 文本生成能力
//!
//! 流程层只依赖这个 trait，测试中可以换成确定性的假实现

use crate::error::LlmError;
use async_trait::async_trait;

/// 一次生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// 采样温度，0.0-1.0
    pub temperature: f64,
    /// 输出 token 上限
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, temperature: f64, max_output_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_output_tokens,
        }
    }
}

/// 文本生成器
///
/// 返回提取后的答案文本；模型没有可用输出时返回占位文本而不是错误。
/// 网络或服务端失败返回 `LlmError`，调用方不做重试。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}
