//! WeCom (企業微信) group-bot webhook delivery.
//!
//! Delivery is best-effort fan-out: every target is attempted once, in order,
//! and one target's outcome never affects the others.

use crate::adapters::http::build_client;
use crate::adapters::system::TokioPause;
use crate::domain::model::{DeliveryReport, WebhookMessage, WebhookTarget};
use crate::domain::ports::{Notifier, Pause};
use crate::utils::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct WeComResponse {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

pub struct WeComNotifier {
    client: Client,
    targets: Vec<WebhookTarget>,
    pause: Arc<dyn Pause>,
    pause_duration: Duration,
}

impl WeComNotifier {
    pub fn new(targets: Vec<WebhookTarget>, timeout: Duration, pause_duration: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            targets,
            pause: Arc::new(TokioPause),
            pause_duration,
        })
    }

    /// 測試時注入不等待的 pause
    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    pub async fn send_markdown(&self, content: &str) -> DeliveryReport {
        self.deliver(&WebhookMessage::markdown(content)).await
    }

    pub async fn send_text(&self, content: &str, mentioned_list: Vec<String>) -> DeliveryReport {
        self.deliver(&WebhookMessage::text(content, mentioned_list))
            .await
    }

    async fn send_to(&self, target: &WebhookTarget, message: &WebhookMessage) -> Result<()> {
        let delivery_error = |reason: String| NotifierError::DeliveryError {
            target: target.to_string(),
            reason,
        };

        let response = self
            .client
            .post(target.url())
            .json(message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    delivery_error("request timed out".to_string())
                } else {
                    delivery_error(format!("transport error: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        let body: WeComResponse = response
            .json()
            .await
            .map_err(|e| {
                delivery_error(format!(
                    "HTTP {} with unreadable body: {}",
                    status,
                    e.without_url()
                ))
            })?;

        if body.errcode != 0 {
            return Err(delivery_error(format!(
                "errcode {}, errmsg {}",
                body.errcode, body.errmsg
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for WeComNotifier {
    async fn deliver(&self, message: &WebhookMessage) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for (index, target) in self.targets.iter().enumerate() {
            if index > 0 {
                self.pause.pause(self.pause_duration).await;
            }

            match self.send_to(target, message).await {
                Ok(()) => {
                    tracing::info!("✅ 企业微信推送成功: {}", target);
                    report.success += 1;
                }
                Err(e) => {
                    tracing::error!("❌ 企业微信推送失败: {}", e);
                    report.failed += 1;
                    report.errors.push(e.to_string());
                }
            }
        }

        report
    }
}
