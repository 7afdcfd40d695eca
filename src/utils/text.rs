//! 文本预处理
//!
//! 字数/字符统计，以及按字符预算截断文章（不切断单词）

/// 截断后追加的可见标记
pub const TRUNCATION_MARKER: &str = "\n\n[TRUNCATED - original article longer]";

/// 按空白分词计数
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 字符数（按 Unicode 标量值计）
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// 将文本截断到 `max_chars` 个字符以内
///
/// 未超出预算时原样返回。超出时先在 `max_chars` 处切开，若切点落在单词中间，
/// 则回退到前一个空白处，最后追加 [`TRUNCATION_MARKER`]。
///
/// 结果长度不超过 `max_chars + TRUNCATION_MARKER` 的长度。
pub fn truncate(text: &str, max_chars: usize) -> String {
    let cut = match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return text.to_string(),
    };

    let (head, tail) = text.split_at(cut);
    let at_boundary = tail.starts_with(char::is_whitespace);

    let kept = if at_boundary {
        head
    } else {
        // 单个超长单词：宁可丢弃也不切断
        match head.rfind(char::is_whitespace) {
            Some(pos) => &head[..pos],
            None => "",
        }
    };

    let mut out = kept.trim_end().to_string();
    out.push_str(TRUNCATION_MARKER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("a b  c"), 3);
        assert_eq!(count_words("  leading\tand\ntrailing  "), 3);
        assert_eq!(count_words("The sky is blue. Water is wet."), 7);
    }

    #[test]
    fn test_count_chars_is_unicode_aware() {
        assert_eq!(count_chars("The sky is blue. Water is wet."), 30);
        assert_eq!(count_chars("héllo"), 5);
    }

    #[test]
    fn test_short_text_unchanged() {
        let text = "The sky is blue.";
        assert_eq!(truncate(text, 100), text);
        assert_eq!(truncate(text, text.len()), text);
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_cut_inside_word_backs_off() {
        let out = truncate("alpha beta gamma", 8);
        assert_eq!(out, format!("alpha{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_cut_on_boundary_keeps_last_word() {
        let out = truncate("alpha beta gamma", 10);
        assert_eq!(out, format!("alpha beta{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_single_long_word_is_dropped() {
        let out = truncate("supercalifragilistic", 5);
        assert_eq!(out, TRUNCATION_MARKER);
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let text = "día más café ".repeat(20);
        let out = truncate(&text, 17);
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert!(out.starts_with("día más café"));
    }

    #[test]
    fn test_truncation_properties() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua.";
        let chars: Vec<char> = text.chars().collect();

        for max in 1..chars.len() {
            let out = truncate(text, max);
            assert!(out.ends_with(TRUNCATION_MARKER), "max={max}");
            assert!(
                count_chars(&out) <= max + count_chars(TRUNCATION_MARKER),
                "max={max}"
            );

            let body = &out[..out.len() - TRUNCATION_MARKER.len()];
            let body_len = count_chars(body);
            assert!(text.starts_with(body), "max={max}");
            if body_len > 0 {
                // 保留部分以完整单词结束：原文下一个字符必须是空白
                assert!(chars[body_len].is_whitespace(), "max={max}");
                assert!(!chars[body_len - 1].is_whitespace(), "max={max}");
            }
        }
    }
}
