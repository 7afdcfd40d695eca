//! # Article Notes
//!
//! 读取一篇文章，在多个温度下请求远程模型生成摘要，
//! 随后围绕同一篇文章进行交互式问答，最后把结果写成 Markdown 笔记模板。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有输入输出流，只暴露能力
//! - `Console` - 读一行 / 写一行
//!
//! ### ② 客户端（Clients）
//! - `clients/` - 远程模型调用
//! - `TextGenerator` - 生成能力（测试中可替换）
//! - `GeminiClient` - REST 实现，负责从响应中提取答案
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - 提示词构建、报告写入
//!
//! ### ④ 流程层（Workflow）
//! - `SummaryFlow` - 按温度依次生成摘要
//! - `QaFlow` - 必答 + 追加问答，可被中断
//!
//! ### ⑤ 编排层
//! - `App` - 加载 → 预处理 → 摘要 → 问答 → 报告

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, RunOutcome};
pub use clients::{GeminiClient, GenerationRequest, TextGenerator};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{Console, LineConsole, StdConsole};
pub use models::{Article, QaEntry, QaLog, SummarySet};
pub use workflow::{QaFlow, QaOutcome, SummaryFlow};
