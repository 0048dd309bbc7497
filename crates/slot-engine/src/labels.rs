//! Russian labels shown next to offered slots.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::clock::format_minutes;

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const MONTHS_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "пн",
        Weekday::Tue => "вт",
        Weekday::Wed => "ср",
        Weekday::Thu => "чт",
        Weekday::Fri => "пт",
        Weekday::Sat => "сб",
        Weekday::Sun => "вс",
    }
}

/// Label for a single offered slot.
///
/// `day_offset` counts calendar days from today: 0 gives `"Сегодня в 10:00"`,
/// 1 gives `"Завтра в 10:00"`, anything else `"23 марта в 10:00"`.
pub fn slot_label(day_offset: u32, date: NaiveDate, start_minute: u32) -> String {
    let time = format_minutes(start_minute);
    match day_offset {
        0 => format!("Сегодня в {}", time),
        1 => format!("Завтра в {}", time),
        _ => format!(
            "{} {} в {}",
            date.day(),
            MONTHS_GENITIVE[date.month0() as usize],
            time
        ),
    }
}

/// Day heading for quick-pick slots: `"Сегодня"`, `"Завтра"`, or a short
/// date such as `"пн, 23 мар."`.
pub fn day_label(day_offset: u32, date: NaiveDate) -> String {
    match day_offset {
        0 => "Сегодня".to_string(),
        1 => "Завтра".to_string(),
        _ => format!(
            "{}, {} {}",
            weekday_short(date.weekday()),
            date.day(),
            MONTHS_SHORT[date.month0() as usize]
        ),
    }
}
