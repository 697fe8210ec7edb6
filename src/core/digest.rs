use crate::core::countdown::{collect_holidays, nearest_rest_days};
use crate::core::formatter::format_digest;
use crate::domain::model::{DeliveryReport, OutboundMessage, WebhookMessage};
use crate::domain::ports::{Clock, HistorySource, HolidaySource, NewsSource, Notifier};

pub struct DigestOutcome {
    pub message: OutboundMessage,
    /// `None` in dry-run mode
    pub report: Option<DeliveryReport>,
}

/// 每日簡報：抓資料、排版、推送
pub struct DigestEngine<'a> {
    news: &'a dyn NewsSource,
    history: &'a dyn HistorySource,
    holidays: &'a dyn HolidaySource,
    clock: &'a dyn Clock,
    horizon_days: u32,
}

impl<'a> DigestEngine<'a> {
    pub fn new(
        news: &'a dyn NewsSource,
        history: &'a dyn HistorySource,
        holidays: &'a dyn HolidaySource,
        clock: &'a dyn Clock,
        horizon_days: u32,
    ) -> Self {
        Self {
            news,
            history,
            holidays,
            clock,
            horizon_days,
        }
    }

    pub async fn build_message(&self) -> OutboundMessage {
        let news = self.news.fetch_news().await;
        let history = self.history.fetch_history().await;

        let today = self.clock.today();
        let holidays = collect_holidays(self.holidays, today).await;
        let rest_days = match nearest_rest_days(today, &holidays, self.horizon_days) {
            Ok(rest_days) => rest_days,
            Err(e) => {
                tracing::error!("❌ Countdown skipped: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                Vec::new()
            }
        };

        format_digest(news.as_ref(), history.as_ref(), &rest_days)
    }

    pub async fn run(&self, notifier: Option<&dyn Notifier>) -> DigestOutcome {
        tracing::info!("🚀 Starting daily digest");
        let message = self.build_message().await;

        let Some(notifier) = notifier else {
            tracing::info!("🔍 Dry run - message not delivered");
            return DigestOutcome {
                message,
                report: None,
            };
        };

        let report = notifier
            .deliver(&WebhookMessage::markdown(message.as_str()))
            .await;

        if report.all_delivered() {
            tracing::info!("✅ All deliveries completed ({} targets)", report.success);
        } else {
            tracing::error!(
                "❌ Delivery incomplete: success {}, failed {}",
                report.success,
                report.failed
            );
            for error in &report.errors {
                tracing::error!(" - {}", error);
            }
        }

        DigestOutcome {
            message,
            report: Some(report),
        }
    }
}
