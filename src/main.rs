use anyhow::Result;
use article_notes::utils::logging;
use article_notes::{App, AppError, Config, StdConsole};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 先检查文章，再检查密钥等配置；都不会发出任何请求
    let (app, article) = match App::initialize(config).await {
        Ok(started) => started,
        Err(e @ AppError::Input(_)) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // Ctrl-C 只取消令牌，由流程决定如何收尾
    let cancel = CancellationToken::new();
    let listener = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            listener.cancel();
        }
    });

    let mut console = StdConsole::new();
    match app.run(&article, &mut console, &cancel).await {
        Ok(_) => Ok(()),
        Err(AppError::Interrupted) => {
            warn!("⚠️ 摘要阶段被中断，未生成报告");
            println!("\nAborted by user; no report written.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
