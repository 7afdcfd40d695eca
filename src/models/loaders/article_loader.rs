use crate::error::{AppError, AppResult, InputError};
use crate::models::article::Article;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// 从文本文件加载文章
///
/// - 文件不存在 → `InputError::NotFound`
/// - 去除空白后为空 → `InputError::Empty`
/// - 其他读取失败 → `FileError::ReadFailed`
pub async fn load_article(path: &Path, max_chars: usize) -> AppResult<Article> {
    let shown = path.display().to_string();

    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(InputError::NotFound { path: shown }.into());
        }
        Err(e) => return Err(AppError::file_read_failed(shown, e)),
    };

    if raw.trim().is_empty() {
        return Err(InputError::Empty { path: shown }.into());
    }

    let article = Article::prepare(&raw, max_chars);
    info!(
        "✓ 已加载文章: {} ({} 词, {} 字符)",
        shown,
        article.word_count(),
        article.char_count()
    );
    if article.is_truncated() {
        warn!("⚠️ 文章超过 {} 字符，提示词将使用截断版本", max_chars);
    }

    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        let err = load_article(&path, 100).await.unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::NotFound { .. })));
        assert!(err.to_string().contains("article.txt"));
    }

    #[tokio::test]
    async fn test_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        std::fs::write(&path, " \n\t\n").unwrap();
        let err = load_article(&path, 100).await.unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::Empty { .. })));
    }

    #[tokio::test]
    async fn test_loads_and_prepares() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        std::fs::write(&path, "The sky is blue. Water is wet.\n").unwrap();
        let article = load_article(&path, 100).await.unwrap();
        assert_eq!(article.word_count(), 7);
        assert_eq!(article.text(), "The sky is blue. Water is wet.");
    }
}
