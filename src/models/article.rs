use crate::utils::{count_chars, count_words, truncate};

/// 一篇待处理的文章
///
/// 启动时加载一次，之后只读
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// 去除首尾空白后的全文
    text: String,
    word_count: usize,
    char_count: usize,
    /// 截断到上下文预算内、用于构建提示词的版本
    prompt_text: String,
}

impl Article {
    /// 由原始文本构建文章，统计基于全文，提示词使用截断版本
    pub fn prepare(raw: &str, max_chars: usize) -> Self {
        let text = raw.trim().to_string();
        Self {
            word_count: count_words(&text),
            char_count: count_chars(&text),
            prompt_text: truncate(&text, max_chars),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    /// 提示词版本是否经过截断
    pub fn is_truncated(&self) -> bool {
        self.prompt_text != self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TRUNCATION_MARKER;

    #[test]
    fn test_prepare_trims_and_counts() {
        let article = Article::prepare("  The sky is blue. Water is wet.\n", 14000);
        assert_eq!(article.text(), "The sky is blue. Water is wet.");
        assert_eq!(article.word_count(), 7);
        assert_eq!(article.char_count(), 30);
        assert_eq!(article.prompt_text(), article.text());
        assert!(!article.is_truncated());
    }

    #[test]
    fn test_counts_use_full_text_when_truncated() {
        let raw = "word ".repeat(100);
        let article = Article::prepare(&raw, 20);
        assert_eq!(article.word_count(), 100);
        assert!(article.is_truncated());
        assert!(article.prompt_text().ends_with(TRUNCATION_MARKER));
    }
}
