use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isOffDay", default)]
    pub is_off_day: bool,
}

impl HolidayInfo {
    pub fn off_day(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_off_day: true,
        }
    }
}

/// ISO 日期字串 (YYYY-MM-DD) -> 節假日資訊
pub type HolidayMap = BTreeMap<String, HolidayInfo>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestDayCategory {
    Holiday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestDayEntry {
    pub offset_days: u32,
    pub category: RestDayCategory,
    pub label: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsBulletin {
    #[serde(default = "unknown_date")]
    pub date: String,
    #[serde(rename = "news", default)]
    pub items: Vec<String>,
}

fn unknown_date() -> String {
    "未知日期".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryBulletin {
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

/// 歷史 API 的 year 有時是字串有時是數字
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// 一次執行只組一次訊息，組好後不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage(String);

impl OutboundMessage {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookTarget(pub String);

impl WebhookTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

/// 日誌中只顯示 key 的前四碼
impl std::fmt::Display for WebhookTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.split_once("key=") {
            Some((base, key)) => {
                let visible: String = key.chars().take(4).collect();
                write!(f, "{}key={}****", base, visible)
            }
            None => f.write_str(&self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBody {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentioned_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownBody {
    pub content: String,
}

/// 企業微信機器人訊息格式，以 msgtype 區分
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "msgtype", rename_all = "lowercase")]
pub enum WebhookMessage {
    Text { text: TextBody },
    Markdown { markdown: MarkdownBody },
}

impl WebhookMessage {
    pub fn markdown(content: impl Into<String>) -> Self {
        WebhookMessage::Markdown {
            markdown: MarkdownBody {
                content: content.into(),
            },
        }
    }

    pub fn text(content: impl Into<String>, mentioned_list: Vec<String>) -> Self {
        WebhookMessage::Text {
            text: TextBody {
                content: content.into(),
                mentioned_list,
            },
        }
    }

    pub fn content(&self) -> &str {
        match self {
            WebhookMessage::Text { text } => &text.content,
            WebhookMessage::Markdown { markdown } => &markdown.content,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl DeliveryReport {
    pub fn all_delivered(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_envelope_shape() {
        let message = WebhookMessage::markdown("## hello");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"msgtype": "markdown", "markdown": {"content": "## hello"}})
        );
    }

    #[test]
    fn test_text_envelope_mentions_all() {
        let message = WebhookMessage::text("喝药", vec!["@all".to_string()]);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["msgtype"], "text");
        assert_eq!(json["text"]["content"], "喝药");
        assert_eq!(json["text"]["mentioned_list"][0], "@all");
    }

    #[test]
    fn test_target_display_masks_key() {
        let target =
            WebhookTarget::new("https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abcdef123456");
        assert_eq!(
            target.to_string(),
            "https://qyapi.weixin.qq.com/cgi-bin/webhook/send?key=abcd****"
        );
        assert_eq!(WebhookTarget::new("http://localhost/hook").to_string(), "http://localhost/hook");
    }

    #[test]
    fn test_history_year_accepts_number() {
        let bulletin: HistoryBulletin = serde_json::from_value(serde_json::json!({
            "items": [
                {"year": 1949, "title": "A"},
                {"year": "1969", "title": "B", "link": "https://example.com"}
            ]
        }))
        .unwrap();
        assert_eq!(bulletin.items[0].year, "1949");
        assert_eq!(bulletin.items[1].year, "1969");
    }

    #[test]
    fn test_news_defaults() {
        let bulletin: NewsBulletin = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(bulletin.date, "未知日期");
        assert!(bulletin.items.is_empty());
    }

    #[test]
    fn test_holiday_info_ignores_extra_fields() {
        let map: HolidayMap = serde_json::from_value(serde_json::json!({
            "2026-01-01": {"date": "2026-01-01", "name": "元旦", "isOffDay": true},
            "2026-01-04": {"date": "2026-01-04", "name": "元旦"}
        }))
        .unwrap();
        assert!(map["2026-01-01"].is_off_day);
        assert!(!map["2026-01-04"].is_off_day);
    }
}
