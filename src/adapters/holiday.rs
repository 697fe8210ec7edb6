use crate::adapters::http::build_client;
use crate::config::{CountdownConfig, NotifierConfig, SourcesConfig};
use crate::domain::model::HolidayMap;
use crate::domain::ports::HolidaySource;
use crate::utils::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct HolidayApiClient {
    client: Client,
    sources: SourcesConfig,
    countdown: CountdownConfig,
}

impl HolidayApiClient {
    pub fn new(sources: SourcesConfig, countdown: CountdownConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(sources.timeout())?,
            sources,
            countdown,
        })
    }

    pub fn from_config(config: &NotifierConfig) -> Result<Self> {
        Self::new(config.sources.clone(), config.countdown.clone())
    }

    pub async fn try_fetch(&self, year: i32) -> Result<HolidayMap> {
        let url = self.sources.holiday_url_for(year);
        tracing::debug!("Requesting holiday calendar: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::ProviderError {
                provider: "holiday".to_string(),
                message: format!("HTTP status {}", status),
            });
        }

        Ok(response.json::<HolidayMap>().await?)
    }
}

#[async_trait]
impl HolidaySource for HolidayApiClient {
    async fn fetch(&self, year: i32) -> HolidayMap {
        match self.try_fetch(year).await {
            Ok(data) => {
                tracing::info!("📅 {}年节假日数据获取成功 ({} entries)", year, data.len());
                data
            }
            Err(e) => {
                tracing::warn!("⚠️ {}年节假日API获取失败，使用本地数据: {}", year, e);
                self.countdown
                    .fallback_for(year)
                    .cloned()
                    .unwrap_or_default()
            }
        }
    }
}
