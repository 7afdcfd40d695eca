//! 报告写入服务
//!
//! 只负责把一次运行的结果写成 Markdown 笔记模板，不关心流程

use crate::error::{AppError, AppResult};
use crate::models::{Article, QaLog, SummarySet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 一次运行的全部结果
pub struct Report<'a> {
    pub article: &'a Article,
    pub model_name: &'a str,
    pub summaries: &'a SummarySet,
    pub qa_log: &'a QaLog,
}

/// 报告写入服务
pub struct ReportWriter {
    report_file_path: PathBuf,
}

impl ReportWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.report_file_path
    }

    /// 渲染 Markdown
    pub fn render(&self, report: &Report<'_>) -> String {
        let title = self
            .report_file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "observations.md".to_string());

        let mut out = format!(
            "# {}\n\nArticle word count: {}\n\nArticle character count: {}\n\nModel: {}\n\n",
            title,
            report.article.word_count(),
            report.article.char_count(),
            report.model_name
        );

        out.push_str("## Summaries at different temperatures\n\n");
        for entry in report.summaries.iter() {
            out.push_str(&format!(
                "### Temperature {}\n\nSummary:\n\n{}\n\nObservations (style / detail / factuality):\n\n- \n\n",
                entry.temperature, entry.summary
            ));
        }

        out.push_str("## Q&A\n\n");
        for (idx, qa) in report.qa_log.iter().enumerate() {
            out.push_str(&format!(
                "### Q{}: {}\n\nAnswer:\n\n{}\n\nNotes:\n\n- \n\n",
                idx + 1,
                qa.question,
                qa.answer
            ));
        }

        out
    }

    /// 渲染并整体覆盖写入报告文件
    pub async fn write(&self, report: &Report<'_>) -> AppResult<()> {
        let content = self.render(report);
        debug!(
            "写入报告: {} ({} 字节)",
            self.report_file_path.display(),
            content.len()
        );

        tokio::fs::write(&self.report_file_path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.report_file_path.display().to_string(), e))
    }
}
