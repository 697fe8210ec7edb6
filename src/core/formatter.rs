use crate::core::countdown::format_rest_days;
use crate::domain::model::{HistoryBulletin, NewsBulletin, OutboundMessage, RestDayEntry};

pub const MAX_NEWS_ITEMS: usize = 10;
pub const MAX_HISTORY_ITEMS: usize = 5;
pub const NEWS_UNAVAILABLE: &str = "今日新闻获取失败。";

pub fn format_news_section(news: Option<&NewsBulletin>) -> String {
    let Some(news) = news else {
        return format!("{}\n\n", NEWS_UNAVAILABLE);
    };

    let mut content = format!("## 📰 每日新闻简报 {}\n\n", news.date);
    for (i, item) in news.items.iter().take(MAX_NEWS_ITEMS).enumerate() {
        content.push_str(&format!("{}. {}\n\n", i + 1, item));
    }
    content
}

/// 沒有資料或沒有條目時回傳空字串，整段省略
pub fn format_history_section(history: Option<&HistoryBulletin>) -> String {
    let items = match history {
        Some(history) if !history.items.is_empty() => &history.items,
        _ => return String::new(),
    };

    let mut content = "## 📅 历史上的今天\n\n".to_string();
    for item in items.iter().take(MAX_HISTORY_ITEMS) {
        content.push_str(&format!("📘 **{}年** - {}\n\n", item.year, item.title));
    }
    content
}

/// 組合每日簡報：新聞、歷史上的今天、休息日倒數
pub fn format_digest(
    news: Option<&NewsBulletin>,
    history: Option<&HistoryBulletin>,
    rest_days: &[RestDayEntry],
) -> OutboundMessage {
    let mut content = format_news_section(news);

    let history_content = format_history_section(history);
    if !history_content.is_empty() {
        content.push_str(" \n");
        content.push_str(&history_content);
        content.push('\n');
    }

    let countdown = format_rest_days(rest_days);
    if !countdown.is_empty() {
        content.push_str(" \n");
        content.push_str(&countdown);
        content.push('\n');
    }

    OutboundMessage::new(content)
}
