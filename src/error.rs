use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文章错误
    #[error(transparent)]
    Input(#[from] InputError),
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// 远程模型服务错误
    #[error("Remote model service error: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("File error: {0}")]
    File(#[from] FileError),
    /// 控制台读写失败
    #[error("Console I/O error: {0}")]
    Console(#[from] std::io::Error),
    /// 用户中断（摘要阶段）
    #[error("Run interrupted by user before the report was written")]
    Interrupted,
}

/// 输入文章错误
///
/// 属于“可预期”的失败：打印提示后正常退出，不生成报告
#[derive(Debug, Error)]
pub enum InputError {
    /// 文章文件不存在
    #[error("❌ Could not find '{path}'. Please create it with your article text.")]
    NotFound { path: String },
    /// 文章文件为空
    #[error("❌ '{path}' is empty. Please add article text.")]
    Empty { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未配置 API 密钥
    #[error("no API key configured; set GEMINI_API_KEY (or LLM_API_KEY) before running")]
    MissingCredential,
    /// 温度列表为空
    #[error("the summary temperature list is empty")]
    EmptyTemperatures,
    /// 温度超出 0.0-1.0
    #[error("temperature {value} is outside the range 0.0-1.0")]
    TemperatureOutOfRange { value: f64 },
    /// 温度重复
    #[error("temperature {value} is listed more than once")]
    DuplicateTemperature { value: f64 },
    /// 句子数量范围无效
    #[error("summary sentence range {min}-{max} is invalid")]
    InvalidSentenceRange { min: usize, max: usize },
    /// 数值上限为 0
    #[error("{field} must be greater than zero")]
    ZeroLimit { field: &'static str },
    /// 读取配置文件失败
    #[error("failed to read config file {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("failed to parse config file {path}: {source}")]
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
}

/// 远程模型服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 网络请求失败
    #[error("request to model {model} failed: {source}")]
    RequestFailed {
        model: String,
        source: reqwest::Error,
    },
    /// 服务返回非 2xx 状态
    #[error("model {model} returned HTTP {status}: {body}")]
    BadResponse {
        model: String,
        status: u16,
        body: String,
    },
    /// 响应体无法解析
    #[error("could not decode response from model {model}: {source}")]
    InvalidResponse {
        model: String,
        source: serde_json::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为“可预期”的输入错误（打印后正常退出）
    pub fn is_missing_input(&self) -> bool {
        matches!(self, AppError::Input(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message_mentions_path() {
        let err = AppError::from(InputError::NotFound {
            path: "/tmp/article.txt".to_string(),
        });
        assert!(err.is_missing_input());
        assert!(err.to_string().contains("/tmp/article.txt"));
    }

    #[test]
    fn test_config_error_is_not_missing_input() {
        let err = AppError::from(ConfigError::MissingCredential);
        assert!(!err.is_missing_input());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
