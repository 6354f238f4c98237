use crate::scanner::parse_int_prefix;
use jiff::{
    Timestamp,
    civil::{Date, DateTime, Time},
    tz::TimeZone,
};

/// Field order used for numeric dates, i.e. the date part of a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    /// `2020-05-03`
    #[default]
    YearMonthDay,
    /// `05/03/2020`
    MonthDayYear,
    /// `03.05.2020`
    DayMonthYear,
}

impl DateOrder {
    fn format(self) -> &'static str {
        match self {
            DateOrder::YearMonthDay => "%Y-%m-%d",
            DateOrder::MonthDayYear => "%m/%d/%Y",
            DateOrder::DayMonthYear => "%d.%m.%Y",
        }
    }
}

/// Reads a date literal into milliseconds since the epoch.
///
/// One leading `"`/`(` and one trailing `"`/`)` are dropped first. A 4
/// character literal is a bare year and maps to local midnight on January 1st.
/// Everything else is tried as an RFC 3339 timestamp, an ISO civil datetime in
/// `tz`, and finally a numeric date in `order`. `None` when nothing matches.
pub(crate) fn parse_date(text: &str, order: DateOrder, tz: &TimeZone) -> Option<i64> {
    let text = text
        .strip_prefix(|c: char| matches!(c, '"' | '('))
        .unwrap_or(text);
    let text = text
        .strip_suffix(|c: char| matches!(c, '"' | ')'))
        .unwrap_or(text);

    if text.chars().count() == 4 {
        let year = i16::try_from(parse_int_prefix(text)?).ok()?;
        return local_midnight(Date::new(year, 1, 1).ok()?, tz);
    }
    if let Ok(timestamp) = text.parse::<Timestamp>() {
        return Some(timestamp.as_millisecond());
    }
    if let Ok(datetime) = text.parse::<DateTime>() {
        let zoned = tz.to_zoned(datetime).ok()?;
        return Some(zoned.timestamp().as_millisecond());
    }
    local_midnight(parse_numeric_date(text, order)?, tz)
}

/// Renders a timestamp for the query language (without quoting).
///
/// January 1st collapses to the bare year, which is lossy for values with a
/// time of day. Other local midnights use `order`; anything else falls back to
/// an RFC 3339 instant. `None` when the value is outside the supported range.
pub(crate) fn stringify_date(millis: i64, order: DateOrder, tz: &TimeZone) -> Option<String> {
    let timestamp = Timestamp::from_millisecond(millis).ok()?;
    let zoned = timestamp.to_zoned(tz.clone());
    if zoned.month() == 1 && zoned.day() == 1 {
        return Some(format!("{:04}", zoned.year()));
    }
    if zoned.time() == Time::midnight() {
        return Some(zoned.date().strftime(order.format()).to_string());
    }
    Some(timestamp.to_string())
}

fn local_midnight(date: Date, tz: &TimeZone) -> Option<i64> {
    let zoned = tz.to_zoned(date.at(0, 0, 0, 0)).ok()?;
    Some(zoned.timestamp().as_millisecond())
}

fn parse_numeric_date(text: &str, order: DateOrder) -> Option<Date> {
    let sep = text.chars().find(|ch| matches!(ch, '-' | '/' | '.'))?;
    let year_first = format!("%Y{sep}%m{sep}%d");
    let month_first = format!("%m{sep}%d{sep}%Y");
    let day_first = format!("%d{sep}%m{sep}%Y");
    let mut formats = match order {
        DateOrder::YearMonthDay | DateOrder::MonthDayYear => [year_first, month_first, day_first],
        DateOrder::DayMonthYear => [year_first, day_first, month_first],
    };
    let starts_with_year = text.len() > 4
        && text.chars().take(4).all(|c| c.is_ascii_digit())
        && text[4..].starts_with(sep);
    if !starts_with_year {
        formats.rotate_left(1);
    }
    formats
        .iter()
        .find_map(|format| Date::strptime(format, text).ok())
}
