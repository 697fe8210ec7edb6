use crate::domain::model::{
    DeliveryReport, HistoryBulletin, HolidayMap, NewsBulletin, WebhookMessage,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Holiday calendar keyed by year. Never fails: an unreachable source yields an empty map.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    async fn fetch(&self, year: i32) -> HolidayMap;
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self) -> Option<NewsBulletin>;
}

#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn fetch_history(&self) -> Option<HistoryBulletin>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: &WebhookMessage) -> DeliveryReport;
}

/// 發送間隔，測試時替換成不等待的實作
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}
