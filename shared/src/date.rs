//! 上映日期格式化
//!
//! TMDb 的 `release_date` 是 `YYYY-MM-DD` 字符串，这里把它转成长格式的本地化日期。
//! 解析失败时原样返回，空字符串保持为空。

use crate::Locale;
use chrono::NaiveDate;

/// 解析 ISO 日历日期
pub fn parse_release_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// 按语言输出长日期：`March 15, 2024` / `15 de marzo de 2024`
pub fn format_release_date(s: &str, locale: Locale) -> String {
    let Some(date) = parse_release_date(s) else {
        return s.to_string();
    };

    let (pattern, chrono_locale) = match locale {
        Locale::En => ("%B %-d, %Y", chrono::Locale::en_US),
        Locale::Es => ("%-d de %B de %Y", chrono::Locale::es_ES),
    };
    date.and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .format_localized(pattern, chrono_locale)
        .to_string()
}
