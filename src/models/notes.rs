//! 运行过程中累积的结果：各温度下的摘要与问答记录

use std::fmt;

/// 温度标签
///
/// 以十进制字面量的形式显示：`0.1`、`0.7`、`1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(pub f64);

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// 单个温度下的摘要
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub temperature: Temperature,
    pub summary: String,
}

/// 温度 → 摘要，按配置顺序排列，温度不重复
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummarySet {
    entries: Vec<SummaryEntry>,
}

impl SummarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录某温度下的摘要
    ///
    /// 同一温度再次写入时覆盖原摘要、保留原位置
    pub fn insert(&mut self, temperature: f64, summary: impl Into<String>) {
        let summary = summary.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.temperature.0 == temperature)
        {
            Some(existing) => existing.summary = summary,
            None => self.entries.push(SummaryEntry {
                temperature: Temperature(temperature),
                summary,
            }),
        }
    }

    pub fn get(&self, temperature: f64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.temperature.0 == temperature)
            .map(|e| e.summary.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 一问一答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

/// 问答记录，只追加，按提问顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QaLog {
    entries: Vec<QaEntry>,
}

impl QaLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.entries.push(QaEntry {
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &QaEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_label() {
        assert_eq!(Temperature(0.1).to_string(), "0.1");
        assert_eq!(Temperature(0.7).to_string(), "0.7");
        assert_eq!(Temperature(1.0).to_string(), "1.0");
        assert_eq!(Temperature(0.0).to_string(), "0.0");
        assert_eq!(Temperature(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_summary_set_keeps_order_and_uniqueness() {
        let mut set = SummarySet::new();
        set.insert(0.7, "second");
        set.insert(0.1, "first");
        set.insert(0.7, "replaced");

        let labels: Vec<String> = set.iter().map(|e| e.temperature.to_string()).collect();
        assert_eq!(labels, vec!["0.7", "0.1"]);
        assert_eq!(set.get(0.7), Some("replaced"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1.0), None);
    }

    #[test]
    fn test_qa_log_is_chronological() {
        let mut log = QaLog::new();
        assert!(log.is_empty());
        log.push("first?", "a");
        log.push("second?", "b");
        let questions: Vec<&str> = log.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["first?", "second?"]);
    }
}
