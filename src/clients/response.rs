//! 远程模型响应的数据结构与文本提取策略
//!
//! 响应可能带一个汇总后的 `text` 字段，也可能只有候选列表
//! （每个候选包含若干内容片段，片段不一定有文本）。
//! [`extract_answer`] 按固定优先级从中取出唯一的答案文本。

use serde::Deserialize;
use std::fmt;

/// 模型没有给出可用输出时的占位文本
pub const NO_OUTPUT_SENTINEL: &str = "[⚠️ No output received — likely cut off by max tokens]";

/// `generateContent` 响应体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// 部分兼容网关会直接返回汇总文本
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// 单个候选输出
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// 内容片段，非文本片段（如函数调用）没有 `text`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// 提示词级别的反馈（安全过滤等）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafetyRating {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub probability: String,
}

impl fmt::Display for PromptFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block_reason={}",
            self.block_reason.as_deref().unwrap_or("none")
        )?;
        for rating in &self.safety_ratings {
            write!(f, " {}={}", rating.category, rating.probability)?;
        }
        Ok(())
    }
}

impl GenerateContentResponse {
    /// 汇总文本
    ///
    /// 优先使用响应自带的 `text` 字段；否则仅当恰好有一个候选时，
    /// 拼接该候选的全部文本片段（与官方 SDK 的 `response.text` 一致）。
    pub fn aggregated_text(&self) -> Option<String> {
        if let Some(text) = &self.text {
            return Some(text.clone());
        }
        match self.candidates.as_slice() {
            [only] => {
                let parts = &only.content.as_ref()?.parts;
                let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
                if texts.is_empty() {
                    None
                } else {
                    Some(texts.concat())
                }
            }
            _ => None,
        }
    }

    /// 所有候选中的全部文本片段，按出现顺序
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
    }

    /// 第一个候选的结束原因
    pub fn first_finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}

/// 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// 模型给出的文本（已去除首尾空白）
    Text(String),
    /// 没有可用输出
    NoOutput,
}

impl Answer {
    /// 转为可展示的文本，`NoOutput` 显示为占位文本
    pub fn into_text(self) -> String {
        match self {
            Answer::Text(text) => text,
            Answer::NoOutput => NO_OUTPUT_SENTINEL.to_string(),
        }
    }
}

/// 从响应中提取答案
///
/// 1. 汇总文本非空 → 去除首尾空白后返回
/// 2. 否则拼接所有候选的所有文本片段（单个空格分隔），非空则返回
/// 3. 否则返回 [`Answer::NoOutput`]
///
/// 诊断字段（`prompt_feedback`、`finish_reason`）不参与判断。
pub fn extract_answer(response: &GenerateContentResponse) -> Answer {
    if let Some(text) = response.aggregated_text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Answer::Text(trimmed.to_string());
        }
    }

    let joined = response.fragments().collect::<Vec<_>>().join(" ");
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        return Answer::Text(trimmed.to_string());
    }

    Answer::NoOutput
}
