//! 应用编排
//!
//! ```text
//! App (加载 → 预处理 → 摘要 → 问答 → 报告)
//!     ↓
//! workflow::{SummaryFlow, QaFlow}
//!     ↓
//! services (提示词 / 报告) + clients (TextGenerator)
//!     ↓
//! infrastructure (Console)
//! ```

use crate::clients::{GeminiClient, TextGenerator};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::Console;
use crate::models::{load_article, Article, QaLog, SummarySet};
use crate::services::{Report, ReportWriter};
use crate::utils::logging::{log_finished, log_startup};
use crate::workflow::{QaFlow, QaOutcome, SummaryFlow};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// 一次运行的结果
#[derive(Debug)]
pub struct RunOutcome {
    pub summaries: SummarySet,
    pub qa_log: QaLog,
    pub qa_outcome: QaOutcome,
    pub report_file: PathBuf,
}

/// 应用主结构
pub struct App<G> {
    config: Config,
    generator: G,
}

impl App<GeminiClient> {
    /// 使用 Gemini 客户端初始化应用
    ///
    /// 先读取文章，再校验配置；两者都在任何网络调用之前完成
    pub async fn initialize(config: Config) -> AppResult<(Self, Article)> {
        Self::start(config, GeminiClient::new).await
    }
}

impl<G: TextGenerator> App<G> {
    /// 启动：加载文章 → 校验配置 → 创建文本生成器
    ///
    /// - 文章缺失/为空：返回 `AppError::Input`，不检查密钥
    /// - 配置无效（如缺少 API 密钥）：返回 `AppError::Config`，生成器不会被创建
    pub async fn start<F>(config: Config, build: F) -> AppResult<(Self, Article)>
    where
        F: FnOnce(&Config) -> G,
    {
        log_startup(&config.model_name, &config.article_file, &config.temperatures);

        let article = load_article(&config.article_file, config.max_article_chars).await?;
        config.validate()?;

        let generator = build(&config);
        Ok((Self { config, generator }, article))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行完整流程
    ///
    /// - 摘要阶段被中断：返回 `AppError::Interrupted`，不写报告
    /// - 问答阶段被中断：结束问答，照常写报告
    pub async fn run(
        &self,
        article: &Article,
        console: &mut dyn Console,
        cancel: &CancellationToken,
    ) -> AppResult<RunOutcome> {
        let config = &self.config;

        console
            .write_line(&format!(
                "\nArticle length: {} words, {} characters.\n",
                article.word_count(),
                article.char_count()
            ))
            .await?;

        let summaries = SummaryFlow::new(&self.generator, config)
            .run(article, console, cancel)
            .await?;

        let (qa_log, qa_outcome) = QaFlow::new(&self.generator, config)
            .run(article, console, cancel)
            .await?;

        let writer = ReportWriter::with_path(&config.report_file);
        writer
            .write(&Report {
                article,
                model_name: &config.model_name,
                summaries: &summaries,
                qa_log: &qa_log,
            })
            .await?;

        console
            .write_line(&format!(
                "Observations template written to {}",
                writer.path().display()
            ))
            .await?;
        info!("✓ 报告写入完成");
        log_finished(summaries.len(), qa_log.len(), writer.path());

        Ok(RunOutcome {
            summaries,
            qa_log,
            qa_outcome,
            report_file: writer.path().to_path_buf(),
        })
    }
}
