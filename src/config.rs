use crate::error::{AppError, AppResult, ConfigError};
use crate::models::MAX_CHARS;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "analyzer.toml";

/// 程序配置文件
///
/// 优先级：环境变量 > analyzer.toml > 默认值
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待分析文章所在目录
    pub input_folder: String,
    /// 结果 CSV 路径
    pub output_csv: String,
    /// 警告文件
    pub warn_file: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 单篇文章最大字符数，只能调低，不能超过 `MAX_CHARS`
    pub max_chars: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- NLU 配置 ---
    pub nlu_api_key: Option<String>,
    pub nlu_url: Option<String>,
    pub nlu_version: String,
    // --- 翻译配置 ---
    pub gemini_api_key: Option<String>,
    pub gemini_api_base_url: String,
    pub gemini_model_name: String,
    /// 本地加速翻译服务（如 M2M100 推理服务）
    pub local_translator_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "articles".to_string(),
            output_csv: "analysis_results.csv".to_string(),
            warn_file: "warn.txt".to_string(),
            output_log_file: "output.txt".to_string(),
            max_chars: MAX_CHARS,
            verbose_logging: false,
            nlu_api_key: None,
            nlu_url: None,
            nlu_version: "2021-08-01".to_string(),
            gemini_api_key: None,
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            gemini_model_name: "gemini-2.5-flash".to_string(),
            local_translator_url: None,
        }
    }
}

impl Config {
    /// 只从环境变量读取（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// 加载 .env、配置文件和环境变量
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();
        let base = if path.exists() {
            Self::from_toml_file(path)?
        } else {
            Self::default()
        };

        let config = base.with_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// 解析 TOML 配置文件
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::Config(ConfigError::TomlParseFailed { source, .. }) => {
                AppError::Config(ConfigError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// 用环境变量覆盖当前配置
    ///
    /// `lookup` 便于测试时替换环境
    pub fn with_env_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str, fallback: String| lookup(name).unwrap_or(fallback);
        let secret = |name: &str, fallback: Option<String>| lookup(name).or(fallback);

        Self {
            input_folder: text("INPUT_FOLDER", self.input_folder),
            output_csv: text("OUTPUT_CSV", self.output_csv),
            warn_file: text("WARN_FILE", self.warn_file),
            output_log_file: text("OUTPUT_LOG_FILE", self.output_log_file),
            max_chars: parse_var(&lookup, "MAX_CHARS").unwrap_or(self.max_chars),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            nlu_api_key: secret("NLU_API_KEY", self.nlu_api_key),
            nlu_url: secret("NLU_URL", self.nlu_url),
            nlu_version: text("NLU_VERSION", self.nlu_version),
            gemini_api_key: secret("GEMINI_API_KEY", self.gemini_api_key),
            gemini_api_base_url: text("GEMINI_API_BASE_URL", self.gemini_api_base_url),
            gemini_model_name: text("GEMINI_MODEL_NAME", self.gemini_model_name),
            local_translator_url: secret("LOCAL_TRANSLATOR_URL", self.local_translator_url),
        }
        .normalized()
    }

    /// 空字符串视为未设置
    fn normalized(mut self) -> Self {
        for slot in [
            &mut self.nlu_api_key,
            &mut self.nlu_url,
            &mut self.gemini_api_key,
            &mut self.local_translator_url,
        ] {
            if slot.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *slot = None;
            }
        }
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.max_chars == 0 {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "max_chars".to_string(),
                reason: "必须大于 0".to_string(),
            }));
        }
        if self.max_chars > MAX_CHARS {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "max_chars".to_string(),
                reason: format!("不能超过 {}", MAX_CHARS),
            }));
        }
        Ok(())
    }

    /// NLU 凭据是否齐全
    pub fn nlu_configured(&self) -> bool {
        self.nlu_api_key.is_some() && self.nlu_url.is_some()
    }
}

fn parse_var<T: FromStr, F: Fn(&str) -> Option<String>>(lookup: &F, name: &str) -> Option<T> {
    lookup(name).and_then(|v| v.trim().parse().ok())
}
