/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 输出到 stderr，避免与交互式问答的 stdout 混在一起。
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 模型名称
/// - `article_file`: 文章文件路径
/// - `temperatures`: 摘要温度列表
pub fn log_startup(model: &str, article_file: &Path, temperatures: &[f64]) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {}", model);
    info!("📄 文章: {}", article_file.display());
    info!("🌡️ 摘要温度: {:?}", temperatures);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `summaries`: 摘要数量
/// - `questions`: 问答数量
/// - `report_file`: 报告文件路径
pub fn log_finished(summaries: usize, questions: usize, report_file: &Path) {
    info!("{}", "=".repeat(60));
    info!(
        "📊 完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 摘要: {} 条, 问答: {} 条", summaries, questions);
    info!("📝 报告已保存至: {}", report_file.display());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
