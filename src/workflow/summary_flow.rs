//! 摘要流程
//!
//! 按配置顺序依次在每个温度下生成摘要，每得到一条立即输出

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::clients::{GenerationRequest, TextGenerator};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::Console;
use crate::models::{Article, SummarySet, Temperature};
use crate::services::build_summary_prompt;

/// 摘要流程
pub struct SummaryFlow<'a> {
    generator: &'a dyn TextGenerator,
    temperatures: Vec<f64>,
    max_output_tokens: u32,
    min_sentences: usize,
    max_sentences: usize,
}

impl<'a> SummaryFlow<'a> {
    pub fn new(generator: &'a dyn TextGenerator, config: &Config) -> Self {
        Self {
            generator,
            temperatures: config.temperatures.clone(),
            max_output_tokens: config.summary_max_output_tokens,
            min_sentences: config.summary_min_sentences,
            max_sentences: config.summary_max_sentences,
        }
    }

    /// 生成全部摘要
    ///
    /// 远程调用失败直接返回错误；等待期间被中断返回 `AppError::Interrupted`
    pub async fn run(
        &self,
        article: &Article,
        console: &mut dyn Console,
        cancel: &CancellationToken,
    ) -> AppResult<SummarySet> {
        let prompt = build_summary_prompt(
            article.prompt_text(),
            self.min_sentences,
            self.max_sentences,
        );
        let mut summaries = SummarySet::new();

        for (i, &temperature) in self.temperatures.iter().enumerate() {
            info!(
                "📝 生成摘要 {}/{} (温度 {})",
                i + 1,
                self.temperatures.len(),
                Temperature(temperature)
            );

            let request = GenerationRequest::new(prompt.as_str(), temperature, self.max_output_tokens);
            let summary = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AppError::Interrupted),
                result = self.generator.generate(&request) => result?,
            };

            console.write_line(&"=".repeat(60)).await?;
            console
                .write_line(&format!("Temperature {} summary:\n", Temperature(temperature)))
                .await?;
            console.write_line(&format!("{}\n", summary)).await?;

            summaries.insert(temperature, summary);
        }

        Ok(summaries)
    }
}
