use crate::adapters::http::build_client;
use crate::config::NotifierConfig;
use crate::domain::model::{HistoryBulletin, NewsBulletin};
use crate::domain::ports::{HistorySource, NewsSource};
use crate::utils::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const SUCCESS_CODE: i64 = 200;

/// 60s API 的統一回應外層，code 與 HTTP 狀態碼無關
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

/// 每日新聞與歷史上的今天，兩個端點共用同一個 client
pub struct DailyApiClient {
    client: Client,
    news_url: String,
    history_url: String,
}

impl DailyApiClient {
    pub fn new(news_url: String, history_url: String, timeout: std::time::Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            news_url,
            history_url,
        })
    }

    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        Self::new(
            config.sources.news_url.clone(),
            config.sources.history_url.clone(),
            config.sources.timeout(),
        )
    }

    async fn get_data<T: DeserializeOwned>(&self, provider: &str, url: &str) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != StatusCode::OK {
            return Err(NotifierError::ProviderError {
                provider: provider.to_string(),
                message: format!("HTTP status {}", status),
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if envelope.code != SUCCESS_CODE {
            return Err(NotifierError::ProviderError {
                provider: provider.to_string(),
                message: format!(
                    "application code {}: {}",
                    envelope.code,
                    envelope.message.unwrap_or_default()
                ),
            });
        }

        envelope.data.ok_or_else(|| NotifierError::ProviderError {
            provider: provider.to_string(),
            message: "response has no data".to_string(),
        })
    }

    pub async fn try_fetch_news(&self) -> Result<NewsBulletin> {
        self.get_data("news", &self.news_url).await
    }

    pub async fn try_fetch_history(&self) -> Result<HistoryBulletin> {
        self.get_data("history", &self.history_url).await
    }
}

#[async_trait]
impl NewsSource for DailyApiClient {
    async fn fetch_news(&self) -> Option<NewsBulletin> {
        tracing::info!("📰 正在获取每日新闻...");
        match self.try_fetch_news().await {
            Ok(news) => {
                tracing::info!("✅ 每日新闻获取成功 ({} items)", news.items.len());
                Some(news)
            }
            Err(e) => {
                tracing::warn!("⚠️ 每日新闻接口获取失败: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl HistorySource for DailyApiClient {
    async fn fetch_history(&self) -> Option<HistoryBulletin> {
        tracing::info!("📅 正在获取历史上的今天...");
        match self.try_fetch_history().await {
            Ok(history) => {
                tracing::info!("✅ 历史上的今天获取成功 ({} items)", history.items.len());
                Some(history)
            }
            Err(e) => {
                tracing::warn!("⚠️ 历史上的今天接口获取失败: {}", e);
                None
            }
        }
    }
}
