pub mod countdown;
pub mod digest;
pub mod formatter;
pub mod reminder;

pub use crate::domain::model::{
    DeliveryReport, HistoryBulletin, HolidayMap, NewsBulletin, OutboundMessage, RestDayEntry,
    WebhookMessage, WebhookTarget,
};
pub use crate::domain::ports::{Clock, HistorySource, HolidaySource, NewsSource, Notifier, Pause};
pub use crate::utils::error::Result;
