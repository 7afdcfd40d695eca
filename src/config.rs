use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "article_notes.toml";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    pub model_name: String,
    // --- 文件路径 ---
    /// 文章文件
    pub article_file: PathBuf,
    /// 输出报告文件
    pub report_file: PathBuf,
    // --- 摘要参数 ---
    /// 依次生成摘要的温度列表
    pub temperatures: Vec<f64>,
    pub summary_max_output_tokens: u32,
    pub summary_min_sentences: usize,
    pub summary_max_sentences: usize,
    // --- 问答参数 ---
    pub qa_temperature: f64,
    pub qa_max_output_tokens: u32,
    /// 必答问题数量
    pub required_questions: usize,
    /// 送入提示词的文章最大字符数
    pub max_article_chars: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model_name: "gemini-2.5-flash".to_string(),
            article_file: PathBuf::from("article.txt"),
            report_file: PathBuf::from("observations.md"),
            temperatures: vec![0.1, 0.7, 1.0],
            summary_max_output_tokens: 1024,
            summary_min_sentences: 3,
            summary_max_sentences: 4,
            qa_temperature: 0.2,
            qa_max_output_tokens: 400,
            required_questions: 3,
            max_article_chars: 14000,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件（所有字段可选，覆盖默认值）
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    model_name: Option<String>,
    article_file: Option<PathBuf>,
    report_file: Option<PathBuf>,
    temperatures: Option<Vec<f64>>,
    summary_max_output_tokens: Option<u32>,
    summary_min_sentences: Option<usize>,
    summary_max_sentences: Option<usize>,
    qa_temperature: Option<f64>,
    qa_max_output_tokens: Option<u32>,
    required_questions: Option<usize>,
    max_article_chars: Option<usize>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（若存在）→ 环境变量
    ///
    /// 默认的文章和报告文件位于程序所在目录，覆盖值按原样使用
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("ARTICLE_NOTES_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let defaults = match program_dir() {
            Some(dir) => Self::default().anchored_at(&dir),
            None => Self::default(),
        };

        let base = if path.exists() {
            defaults.merge_file(&path)?
        } else {
            defaults
        };

        Ok(base.overlay_env(|key| std::env::var(key).ok()))
    }

    /// 把相对的文章/报告路径放到 `dir` 下
    fn anchored_at(self, dir: &Path) -> Self {
        Self {
            article_file: dir.join(&self.article_file),
            report_file: dir.join(&self.report_file),
            ..self
        }
    }

    /// 用 TOML 文件覆盖当前配置
    fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_toml(&raw, &path.display().to_string())
    }

    fn merge_toml(self, raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;

        Ok(Self {
            api_key: self.api_key,
            api_base_url: file.api_base_url.unwrap_or(self.api_base_url),
            model_name: file.model_name.unwrap_or(self.model_name),
            article_file: file.article_file.unwrap_or(self.article_file),
            report_file: file.report_file.unwrap_or(self.report_file),
            temperatures: file.temperatures.unwrap_or(self.temperatures),
            summary_max_output_tokens: file
                .summary_max_output_tokens
                .unwrap_or(self.summary_max_output_tokens),
            summary_min_sentences: file.summary_min_sentences.unwrap_or(self.summary_min_sentences),
            summary_max_sentences: file.summary_max_sentences.unwrap_or(self.summary_max_sentences),
            qa_temperature: file.qa_temperature.unwrap_or(self.qa_temperature),
            qa_max_output_tokens: file.qa_max_output_tokens.unwrap_or(self.qa_max_output_tokens),
            required_questions: file.required_questions.unwrap_or(self.required_questions),
            max_article_chars: file.max_article_chars.unwrap_or(self.max_article_chars),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        })
    }

    /// 用环境变量覆盖当前配置，无法解析的值保持原样
    fn overlay_env(self, var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: var("GEMINI_API_KEY")
                .or_else(|| var("LLM_API_KEY"))
                .unwrap_or(self.api_key),
            api_base_url: var("LLM_API_BASE_URL").unwrap_or(self.api_base_url),
            model_name: var("LLM_MODEL_NAME").unwrap_or(self.model_name),
            article_file: var("ARTICLE_FILE").map(PathBuf::from).unwrap_or(self.article_file),
            report_file: var("REPORT_FILE").map(PathBuf::from).unwrap_or(self.report_file),
            temperatures: var("SUMMARY_TEMPERATURES")
                .and_then(|v| parse_temperature_list(&v))
                .unwrap_or(self.temperatures),
            summary_max_output_tokens: parse_var(&var, "SUMMARY_MAX_OUTPUT_TOKENS")
                .unwrap_or(self.summary_max_output_tokens),
            summary_min_sentences: self.summary_min_sentences,
            summary_max_sentences: self.summary_max_sentences,
            qa_temperature: parse_var(&var, "QA_TEMPERATURE").unwrap_or(self.qa_temperature),
            qa_max_output_tokens: parse_var(&var, "QA_MAX_OUTPUT_TOKENS").unwrap_or(self.qa_max_output_tokens),
            required_questions: self.required_questions,
            max_article_chars: parse_var(&var, "MAX_ARTICLE_CHARS").unwrap_or(self.max_article_chars),
            verbose_logging: parse_var(&var, "VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 校验配置，必须在任何网络调用之前执行
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        if self.temperatures.is_empty() {
            return Err(ConfigError::EmptyTemperatures);
        }
        for (i, &t) in self.temperatures.iter().enumerate() {
            check_temperature(t)?;
            if self.temperatures[..i].contains(&t) {
                return Err(ConfigError::DuplicateTemperature { value: t });
            }
        }
        check_temperature(self.qa_temperature)?;
        if self.summary_min_sentences == 0 || self.summary_min_sentences > self.summary_max_sentences {
            return Err(ConfigError::InvalidSentenceRange {
                min: self.summary_min_sentences,
                max: self.summary_max_sentences,
            });
        }
        if self.summary_max_output_tokens == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "summary_max_output_tokens",
            });
        }
        if self.qa_max_output_tokens == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "qa_max_output_tokens",
            });
        }
        if self.max_article_chars == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_article_chars",
            });
        }
        Ok(())
    }
}

/// 可执行文件所在目录，取不到时返回 `None`（退回工作目录）
fn program_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    var(key).and_then(|v| v.trim().parse().ok())
}

fn check_temperature(value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::TemperatureOutOfRange { value })
    }
}

/// 解析逗号分隔的温度列表，如 "0.1,0.7,1.0"
fn parse_temperature_list(raw: &str) -> Option<Vec<f64>> {
    raw.split(',')
        .map(|s| s.trim().parse::<f64>().ok())
        .collect()
}
