#[cfg(feature = "cli")]
pub mod cli;

use crate::core::countdown::DEFAULT_HORIZON_DAYS;
use crate::domain::model::{HolidayInfo, HolidayMap, WebhookTarget};
use crate::utils::error::{NotifierError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "notifier.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_news_url")]
    pub news_url: String,
    #[serde(default = "default_history_url")]
    pub history_url: String,
    /// `{year}` 會被替換成查詢年份
    #[serde(default = "default_holiday_url")]
    pub holiday_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// 年份 -> 節假日表，只在該年份 API 失敗時使用
    #[serde(default = "default_fallback_holidays")]
    pub fallback: BTreeMap<String, HolidayMap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub digest_urls: Vec<String>,
    pub reminder_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_pause_millis")]
    pub pause_millis: u64,
}

fn default_news_url() -> String {
    "http://10.1.1.140:4399/v2/60s".to_string()
}

fn default_history_url() -> String {
    "http://10.1.1.140:4399/v2/today-in-history".to_string()
}

fn default_holiday_url() -> String {
    "https://api.jiejiariapi.com/v1/holidays/{year}".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

fn default_pause_millis() -> u64 {
    500
}

pub fn default_fallback_holidays() -> BTreeMap<String, HolidayMap> {
    let table_2026: HolidayMap = [
        ("2026-01-01", "元旦"),
        ("2026-02-17", "春节"),
        ("2026-05-01", "劳动节"),
        ("2026-06-19", "端午节"),
        ("2026-09-25", "中秋节"),
        ("2026-10-01", "国庆节"),
    ]
    .into_iter()
    .map(|(date, name)| (date.to_string(), HolidayInfo::off_day(name)))
    .collect();

    BTreeMap::from([("2026".to_string(), table_2026)])
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            news_url: default_news_url(),
            history_url: default_history_url(),
            holiday_url: default_holiday_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            fallback: default_fallback_holidays(),
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            digest_urls: Vec::new(),
            reminder_url: None,
            timeout_seconds: default_timeout_seconds(),
            pause_millis: default_pause_millis(),
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn holiday_url_for(&self, year: i32) -> String {
        self.holiday_url.replace("{year}", &year.to_string())
    }
}

impl CountdownConfig {
    pub fn fallback_for(&self, year: i32) -> Option<&HolidayMap> {
        self.fallback.get(&year.to_string())
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_millis)
    }

    pub fn digest_targets(&self) -> Result<Vec<WebhookTarget>> {
        validation::validate_non_empty("webhook.digest_urls", &self.digest_urls)?;
        for url in &self.digest_urls {
            validation::validate_no_placeholder("webhook.digest_urls", url)?;
            validation::validate_url("webhook.digest_urls", url)?;
        }
        Ok(self.digest_urls.iter().map(WebhookTarget::new).collect())
    }

    pub fn reminder_target(&self) -> Result<WebhookTarget> {
        let url = validation::validate_required_field("webhook.reminder_url", &self.reminder_url)?;
        validation::validate_no_placeholder("webhook.reminder_url", url)?;
        validation::validate_url("webhook.reminder_url", url)?;
        Ok(WebhookTarget::new(url.as_str()))
    }
}

impl NotifierConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NotifierError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NotifierError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 指定路徑必須存在；沒指定時讀取預設檔，不存在就用內建預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                tracing::info!("📁 No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${WECOM_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NotifierError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for NotifierConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("sources.news_url", &self.sources.news_url)?;
        validation::validate_url("sources.history_url", &self.sources.history_url)?;
        validation::validate_url("sources.holiday_url", &self.sources.holiday_url_for(2026))?;
        validation::validate_positive_number(
            "sources.timeout_seconds",
            self.sources.timeout_seconds,
            1,
        )?;
        validation::validate_positive_number(
            "webhook.timeout_seconds",
            self.webhook.timeout_seconds,
            1,
        )?;
        validation::validate_range("countdown.horizon_days", self.countdown.horizon_days, 7, 3660)?;

        for year in self.countdown.fallback.keys() {
            if year.parse::<i32>().is_err() {
                return Err(NotifierError::InvalidConfigValueError {
                    field: "countdown.fallback".to_string(),
                    value: year.clone(),
                    reason: "fallback tables must be keyed by year".to_string(),
                });
            }
        }

        Ok(())
    }
}
