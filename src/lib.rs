pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{DigestArgs, ReminderArgs};

pub use adapters::{
    daily::DailyApiClient, holiday::HolidayApiClient, system::SystemClock, wecom::WeComNotifier,
};
pub use config::NotifierConfig;
pub use crate::core::{digest::DigestEngine, reminder::ReminderKind};
pub use utils::error::{NotifierError, Result};
