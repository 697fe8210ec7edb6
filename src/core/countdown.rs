use crate::domain::model::{HolidayMap, RestDayCategory, RestDayEntry};
use crate::domain::ports::HolidaySource;
use crate::utils::error::{NotifierError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DEFAULT_HORIZON_DAYS: u32 = 365;

const ISO_DATE: &str = "%Y-%m-%d";

/// 合併今年與明年的節假日資料
///
/// 今年早於今天的日期會被丟掉；無法解析成日期的 key 直接略過。
/// 同一個 key 後寫入的覆蓋先寫入的。
pub fn merge_holidays(today: NaiveDate, current: HolidayMap, next: HolidayMap) -> HolidayMap {
    let mut merged = HolidayMap::new();

    for (year, data) in [(today.year(), current), (today.year() + 1, next)] {
        for (key, info) in data {
            let date = match NaiveDate::parse_from_str(&key, ISO_DATE) {
                Ok(date) => date,
                Err(_) => {
                    tracing::debug!("Skipping malformed holiday key: {}", key);
                    continue;
                }
            };
            if year == today.year() && date < today {
                continue;
            }
            merged.insert(key, info);
        }
    }

    merged
}

/// 從 source 取得今年與明年的資料並合併
pub async fn collect_holidays(source: &dyn HolidaySource, today: NaiveDate) -> HolidayMap {
    let current = source.fetch(today.year()).await;
    let next = source.fetch(today.year() + 1).await;
    let merged = merge_holidays(today, current, next);
    tracing::info!("📅 Holiday data ready: {} upcoming entries", merged.len());
    merged
}

/// 找出最近的節假日、週六與週日
///
/// 每個類別只保留最早的一筆，結果依天數由小到大排序（同天數保持
/// 節假日、週六、週日的順序）。視窗內找不到週末代表資料有問題。
pub fn nearest_rest_days(
    today: NaiveDate,
    holidays: &HolidayMap,
    horizon_days: u32,
) -> Result<Vec<RestDayEntry>> {
    let mut rest_days = Vec::with_capacity(3);
    let (mut found_holiday, mut found_saturday, mut found_sunday) = (false, false, false);

    for offset in 0..horizon_days {
        let target = today + Duration::days(i64::from(offset));

        if !found_holiday {
            if let Some(info) = holidays.get(&target.format(ISO_DATE).to_string()) {
                if info.is_off_day {
                    rest_days.push(RestDayEntry {
                        offset_days: offset,
                        category: RestDayCategory::Holiday,
                        label: info.name.clone(),
                        date: target,
                    });
                    found_holiday = true;
                }
            }
        }

        if !found_saturday && target.weekday() == Weekday::Sat {
            rest_days.push(RestDayEntry {
                offset_days: offset,
                category: RestDayCategory::Saturday,
                label: "周六".to_string(),
                date: target,
            });
            found_saturday = true;
        }

        if !found_sunday && target.weekday() == Weekday::Sun {
            rest_days.push(RestDayEntry {
                offset_days: offset,
                category: RestDayCategory::Sunday,
                label: "周日".to_string(),
                date: target,
            });
            found_sunday = true;
        }

        if found_holiday && found_saturday && found_sunday {
            break;
        }
    }

    if !found_saturday || !found_sunday {
        return Err(NotifierError::DataIntegrityError {
            message: format!(
                "no weekend found within {} days of {}",
                horizon_days,
                today.format(ISO_DATE)
            ),
        });
    }

    rest_days.sort_by_key(|entry| entry.offset_days);
    Ok(rest_days)
}

pub fn format_rest_days(entries: &[RestDayEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "⏳ 距离{}还有{}天（{}）",
                entry.label,
                entry.offset_days,
                entry.date.format("%Y年%m月%d日")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
