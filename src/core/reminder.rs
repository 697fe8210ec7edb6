use crate::domain::model::WebhookMessage;
use crate::domain::ports::{Clock, Notifier};
use chrono::{NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Morning,
    Afternoon,
    Evening,
    General,
}

impl ReminderKind {
    /// 早上 [7,10)、下午 [13,16)、晚上 [18,22)，其餘時間為一般提醒
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=9 => ReminderKind::Morning,
            13..=15 => ReminderKind::Afternoon,
            18..=21 => ReminderKind::Evening,
            _ => ReminderKind::General,
        }
    }

    /// `auto` 回傳 None，交給時間判斷；無法辨識的參數 (含大小寫不同) 視為一般提醒
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "auto" => None,
            "morning" => Some(ReminderKind::Morning),
            "afternoon" => Some(ReminderKind::Afternoon),
            "evening" => Some(ReminderKind::Evening),
            _ => Some(ReminderKind::General),
        }
    }

    pub fn resolve(arg: Option<&str>, hour: u32) -> Self {
        arg.and_then(Self::from_arg)
            .unwrap_or_else(|| Self::from_hour(hour))
    }

    pub fn title(self) -> &'static str {
        match self {
            ReminderKind::Morning => "🌞 早上喝药提醒",
            ReminderKind::Afternoon => "☀️ 下午喝药提醒",
            ReminderKind::Evening => "🌙 晚上喝药提醒",
            ReminderKind::General => "💊 喝药提醒",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            ReminderKind::Morning => "💊 早上喝药时间到啦！记得按时喝药，开始美好的一天！",
            ReminderKind::Afternoon => "💊 下午喝药时间到！休息一下，记得喝药哦~",
            ReminderKind::Evening => "💊 晚上喝药时间！今天最后一次喝药，坚持就是胜利！",
            ReminderKind::General => "💊 记得按时喝药哦~",
        }
    }

    pub fn time_range(self) -> Option<&'static str> {
        match self {
            ReminderKind::Morning => Some("7:00-10:00"),
            ReminderKind::Afternoon => Some("13:00-16:00"),
            ReminderKind::Evening => Some("18:00-22:00"),
            ReminderKind::General => None,
        }
    }
}

pub fn compose_reminder(kind: ReminderKind, now: NaiveDateTime) -> String {
    let sent_at = now.format("%Y-%m-%d %H:%M:%S");
    match kind.time_range() {
        Some(range) => format!(
            "{}\n{}\n\n⏰ 提醒时间段：{}\n📅 发送时间：{}",
            kind.title(),
            kind.body(),
            range,
            sent_at
        ),
        None => format!("{}\n{}\n\n📅 发送时间：{}", kind.title(), kind.body(), sent_at),
    }
}

pub fn reminder_message(kind: ReminderKind, now: NaiveDateTime) -> WebhookMessage {
    WebhookMessage::text(compose_reminder(kind, now), vec!["@all".to_string()])
}

/// 送出一次喝藥提醒，回傳是否成功；不會把錯誤往外丟
pub async fn send_reminder(arg: Option<&str>, clock: &dyn Clock, notifier: &dyn Notifier) -> bool {
    let now = clock.now();
    let kind = ReminderKind::resolve(arg, now.hour());
    tracing::info!("💊 Sending {:?} reminder", kind);

    let report = notifier.deliver(&reminder_message(kind, now)).await;
    if report.all_delivered() && report.success > 0 {
        tracing::info!("✅ {} 发送成功", kind.title());
        true
    } else {
        for error in &report.errors {
            tracing::error!("❌ {}", error);
        }
        false
    }
}
