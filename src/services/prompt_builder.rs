//! 提示词构建
//!
//! 传入的文章文本必须已截断到上下文预算以内

/// 文章不包含答案时模型应回复的固定文本
pub const NOT_STATED_SENTINEL: &str = "Not stated in article.";

/// 构建摘要提示词
///
/// # 参数
/// - `article_text`: 已截断的文章文本
/// - `min_sentences` / `max_sentences`: 摘要句数范围
pub fn build_summary_prompt(article_text: &str, min_sentences: usize, max_sentences: usize) -> String {
    let length = if min_sentences == max_sentences {
        format!("{}", min_sentences)
    } else {
        format!("{}-{}", min_sentences, max_sentences)
    };

    format!(
        r#"Please provide a {length} sentence summary of the article below.
Keep it factual and concise. Do not add invented facts or outside information.

Article:
{article_text}
"#
    )
}

/// 构建问答提示词
///
/// # 参数
/// - `article_text`: 已截断的文章文本
/// - `question`: 用户问题
pub fn build_question_prompt(article_text: &str, question: &str) -> String {
    format!(
        r#"Based on the article below, answer the question.
Provide a concise, factual answer.
If the article doesn't contain the info, say "{NOT_STATED_SENTINEL}"

Question: {question}

Article:
{article_text}
"#
    )
}
