//! 控制台 - 基础设施层
//!
//! 持有输入/输出流，只暴露“读一行 / 写一行”的能力。
//! 流程层只依赖 [`Console`]，测试中可注入脚本化的输入。

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// 行式交互能力
#[async_trait]
pub trait Console: Send {
    /// 输出一行
    async fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// 显示提示并读取一行（不含换行符），输入结束时返回 `None`
    ///
    /// 实现必须可安全取消：未完成的读取被丢弃后，不会丢失后续输入
    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

fn strip_newline(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// 基于任意异步读写流的控制台
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> LineConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// 取回输出流（测试中用于检查输出内容）
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> Console for LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_newline(line)))
    }
}

/// 标准输入/输出控制台
///
/// stdin 由独立线程阻塞读取并通过通道转发：
/// 取消等待中的读取不会阻塞进程退出
pub struct StdConsole {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
    stdout: tokio::io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            let stdin = io::stdin();
            loop {
                let mut line = String::new();
                match stdin.read_line(&mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        if tx.send(Ok(strip_newline(line))).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        });

        Self {
            lines: rx,
            stdout: tokio::io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.stdout.write_all(line.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await
    }

    async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.stdout.write_all(prompt.as_bytes()).await?;
        self.stdout.flush().await?;

        // 发送端关闭即输入结束
        self.lines.recv().await.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_reads_lines_until_eof() {
        let input: &[u8] = b"first\r\n\nlast";
        let mut console = LineConsole::new(BufReader::new(input), Vec::new());

        assert_eq!(console.read_line("> ").await.unwrap(), Some("first".to_string()));
        assert_eq!(console.read_line("> ").await.unwrap(), Some(String::new()));
        assert_eq!(console.read_line("> ").await.unwrap(), Some("last".to_string()));
        assert_eq!(console.read_line("> ").await.unwrap(), None);

        let output = String::from_utf8(console.into_writer()).unwrap();
        assert_eq!(output, "> > > > ");
    }

    #[tokio::test]
    async fn test_prompt_written_before_read() {
        let reader = tokio_test::io::Builder::new().read(b"answer\n").build();
        let writer = tokio_test::io::Builder::new()
            .write(b"Question 1: ")
            .write(b"Answer:")
            .write(b"\n")
            .build();
        let mut console = LineConsole::new(BufReader::new(reader), writer);

        let line = console.read_line("Question 1: ").await.unwrap();
        assert_eq!(line.as_deref(), Some("answer"));
        console.write_line("Answer:").await.unwrap();
    }
}
