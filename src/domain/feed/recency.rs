use super::model::FeedItem;
use chrono::{Datelike, DateTime, FixedOffset, Months, NaiveDate, NaiveDateTime, Utc};

const COMMON_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S", // no timezone
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S", // ISO without offset
];

/// Parse a source-supplied publication date.
///
/// Feeds are supposed to use RFC 2822 but plenty emit RFC 3339 or a bare
/// timestamp. Naive timestamps are read as UTC. A weekday name that does
/// not match the date is ignored.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed);
    }

    if let Some(rest) = strip_weekday(raw) {
        if let Ok(parsed) = DateTime::parse_from_rfc2822(rest) {
            return Some(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }

    for fmt in COMMON_DATE_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, fmt) {
            return Some(parsed);
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(parsed.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}

/// Drop a leading `"Ddd, "` so the rest can be read without the weekday check
fn strip_weekday(raw: &str) -> Option<&str> {
    let (weekday, rest) = raw.split_once(',')?;
    let weekday = weekday.trim();
    (weekday.len() == 3 && weekday.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| rest.trim_start())
}

/// Same wall-clock instant one calendar year earlier. 29 Feb has no
/// counterpart, so it rolls forward to 1 Mar of the previous year.
pub fn one_year_before(now: DateTime<Utc>) -> DateTime<Utc> {
    if now.month() == 2 && now.day() == 29 {
        return NaiveDate::from_ymd_opt(now.year() - 1, 3, 1)
            .map(|date| date.and_time(now.time()).and_utc())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
    }

    now.checked_sub_months(Months::new(12))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Keep items published on or after `now` minus one calendar year, newest
/// first. Items with an unreadable date are dropped.
pub fn retain_recent(items: Vec<FeedItem>, now: DateTime<Utc>) -> Vec<FeedItem> {
    let cutoff = one_year_before(now);

    let mut dated: Vec<(DateTime<FixedOffset>, FeedItem)> = items
        .into_iter()
        .filter_map(|item| parse_pub_date(&item.pub_date).map(|date| (date, item)))
        .filter(|(date, _)| *date >= cutoff)
        .collect();

    dated.sort_by(|(a, _), (b, _)| b.cmp(a));

    dated.into_iter().map(|(_, item)| item).collect()
}
