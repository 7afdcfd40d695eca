//! 交互式问答流程
//!
//! 流程顺序：
//! 1. 必答阶段：收集固定数量的非空问题，空输入不计数
//! 2. 追加阶段：直到空行或退出词（quit / q / exit，不区分大小写）
//!
//! 中断（Ctrl-C）或输入结束时提前退出，已收集的问答照常保留

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::clients::{GenerationRequest, TextGenerator};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::Console;
use crate::models::{Article, QaLog};
use crate::services::build_question_prompt;

/// 结束追加阶段的输入
const EXIT_TOKENS: [&str; 4] = ["", "quit", "q", "exit"];

const EXTRA_QUESTION_PROMPT: &str =
    "Ask another question or press Enter to finish (type 'quit' to exit): ";

/// 是否为退出词
pub fn is_exit_token(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    EXIT_TOKENS.contains(&normalized.as_str())
}

/// 问答结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QaOutcome {
    /// 用户正常结束
    Finished,
    /// 被中断
    Interrupted,
    /// 必答阶段输入流结束
    EndOfInput,
}

/// 一次读取的结果
enum Input {
    Line(String),
    Eof,
    Cancelled,
}

/// 问答流程
pub struct QaFlow<'a> {
    generator: &'a dyn TextGenerator,
    temperature: f64,
    max_output_tokens: u32,
    required_questions: usize,
}

impl<'a> QaFlow<'a> {
    pub fn new(generator: &'a dyn TextGenerator, config: &Config) -> Self {
        Self {
            generator,
            temperature: config.qa_temperature,
            max_output_tokens: config.qa_max_output_tokens,
            required_questions: config.required_questions,
        }
    }

    /// 运行问答，返回按提问顺序记录的问答
    ///
    /// 远程调用失败时返回错误（不重试）
    pub async fn run(
        &self,
        article: &Article,
        console: &mut dyn Console,
        cancel: &CancellationToken,
    ) -> AppResult<(QaLog, QaOutcome)> {
        console.write_line(&"=".repeat(60)).await?;
        console
            .write_line(&format!(
                "Interactive Q&A: Ask at least {} questions about the article.",
                self.required_questions
            ))
            .await?;

        let mut log = QaLog::new();
        let outcome = self.collect(article, console, cancel, &mut log).await?;

        match outcome {
            QaOutcome::Finished => info!("✓ 问答结束，共 {} 条", log.len()),
            QaOutcome::Interrupted => {
                warn!("⚠️ 问答被用户中断，已收集 {} 条", log.len());
                console.write_line("\nInteractive Q&A aborted by user.\n").await?;
            }
            QaOutcome::EndOfInput => {
                warn!("⚠️ 输入已结束，已收集 {} 条", log.len());
                console.write_line("\nInput closed, ending interactive Q&A.\n").await?;
            }
        }

        Ok((log, outcome))
    }

    async fn collect(
        &self,
        article: &Article,
        console: &mut dyn Console,
        cancel: &CancellationToken,
        log: &mut QaLog,
    ) -> AppResult<QaOutcome> {
        // ========== 必答阶段 ==========
        let mut asked = 0;
        while asked < self.required_questions {
            let prompt = format!("Question {}: ", asked + 1);
            let line = match read(console, cancel, &prompt).await? {
                Input::Line(line) => line,
                Input::Eof => return Ok(QaOutcome::EndOfInput),
                Input::Cancelled => return Ok(QaOutcome::Interrupted),
            };

            let question = line.trim();
            if question.is_empty() {
                console.write_line("Please type a non-empty question.").await?;
                continue;
            }

            if !self.answer(article, question, console, cancel, log).await? {
                return Ok(QaOutcome::Interrupted);
            }
            asked += 1;
        }

        // ========== 追加阶段 ==========
        loop {
            let line = match read(console, cancel, EXTRA_QUESTION_PROMPT).await? {
                Input::Line(line) => line,
                Input::Eof => return Ok(QaOutcome::Finished),
                Input::Cancelled => return Ok(QaOutcome::Interrupted),
            };

            if is_exit_token(&line) {
                return Ok(QaOutcome::Finished);
            }

            if !self.answer(article, line.trim(), console, cancel, log).await? {
                return Ok(QaOutcome::Interrupted);
            }
        }
    }

    /// 回答一个问题并记录，被中断时返回 `false`
    async fn answer(
        &self,
        article: &Article,
        question: &str,
        console: &mut dyn Console,
        cancel: &CancellationToken,
        log: &mut QaLog,
    ) -> AppResult<bool> {
        let request = GenerationRequest::new(
            build_question_prompt(article.prompt_text(), question),
            self.temperature,
            self.max_output_tokens,
        );

        let answer = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(false),
            result = self.generator.generate(&request) => result?,
        };

        console.write_line(&format!("\nAnswer:\n{}\n", answer)).await?;
        log.push(question, answer);
        Ok(true)
    }
}

async fn read(
    console: &mut dyn Console,
    cancel: &CancellationToken,
    prompt: &str,
) -> AppResult<Input> {
    let line = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(Input::Cancelled),
        line = console.read_line(prompt) => line?,
    };
    Ok(match line {
        Some(line) => Input::Line(line),
        None => Input::Eof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, LlmError};
    use crate::infrastructure::LineConsole;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::io::BufReader;

    /// 记录所有请求，按问题回显答案
    #[derive(Default)]
    struct EchoGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            let question = request
                .prompt
                .lines()
                .find_map(|l| l.strip_prefix("Question: "))
                .unwrap_or_default();
            Ok(format!("answer to {}", question))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
            Err(LlmError::BadResponse {
                model: "fake".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn config() -> Config {
        Config {
            api_key: "test".to_string(),
            ..Config::default()
        }
    }

    fn console(script: &'static str) -> LineConsole<BufReader<&'static [u8]>, Vec<u8>> {
        LineConsole::new(BufReader::new(script.as_bytes()), Vec::new())
    }

    fn article() -> Article {
        Article::prepare("The sky is blue. Water is wet.", 14000)
    }

    #[test]
    fn test_exit_tokens() {
        for token in ["", "  ", "quit", "QUIT", "q", "Q", "exit", " Exit "] {
            assert!(is_exit_token(token), "{token:?}");
        }
        for token in ["quitting", "what?", "e", "no"] {
            assert!(!is_exit_token(token), "{token:?}");
        }
    }

    #[tokio::test]
    async fn test_required_then_quit() {
        let generator = EchoGenerator::default();
        let flow = QaFlow::new(&generator, &config());
        let mut console = console("one\n\n   \ntwo\nthree\nquit\n");

        let (log, outcome) = flow
            .run(&article(), &mut console, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, QaOutcome::Finished);
        let questions: Vec<&str> = log.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["one", "two", "three"]);
        assert_eq!(log.iter().next().unwrap().answer, "answer to one");

        let output = String::from_utf8(console.into_writer()).unwrap();
        assert_eq!(output.matches("Please type a non-empty question.").count(), 2);
        assert!(output.contains("Question 3: "));
        assert!(!output.contains("Question 4: "));
    }

    #[tokio::test]
    async fn test_extra_questions_until_blank_line() {
        let generator = EchoGenerator::default();
        let flow = QaFlow::new(&generator, &config());
        let mut console = console("a\nb\nc\nd\n  E  \n\nignored\n");

        let (log, outcome) = flow
            .run(&article(), &mut console, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, QaOutcome::Finished);
        assert_eq!(log.len(), 5);
        assert_eq!(log.iter().last().unwrap().question, "E");
    }

    #[tokio::test]
    async fn test_requests_use_qa_parameters() {
        let generator = EchoGenerator::default();
        let flow = QaFlow::new(&generator, &config());
        let mut console = console("a\nb\nc\nexit\n");

        flow.run(&article(), &mut console, &CancellationToken::new())
            .await
            .unwrap();

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        for request in requests.iter() {
            assert_eq!(request.temperature, 0.2);
            assert_eq!(request.max_output_tokens, 400);
            assert!(request.prompt.contains("Water is wet."));
        }
    }

    #[tokio::test]
    async fn test_end_of_input_during_required_phase() {
        let generator = EchoGenerator::default();
        let flow = QaFlow::new(&generator, &config());
        let mut console = console("only one\n");

        let (log, outcome) = flow
            .run(&article(), &mut console, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, QaOutcome::EndOfInput);
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_question() {
        let generator = EchoGenerator::default();
        let flow = QaFlow::new(&generator, &config());
        let mut console = console("a\nb\nc\n");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let (log, outcome) = flow.run(&article(), &mut console, &cancel).await.unwrap();

        assert_eq!(outcome, QaOutcome::Interrupted);
        assert!(log.is_empty());
        assert!(generator.requests.lock().unwrap().is_empty());
        let output = String::from_utf8(console.into_writer()).unwrap();
        assert!(output.contains("Interactive Q&A aborted by user."));
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let flow = QaFlow::new(&FailingGenerator, &config());
        let mut console = console("a\n");

        let err = flow
            .run(&article(), &mut console, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::BadResponse { status: 503, .. })));
    }
}
