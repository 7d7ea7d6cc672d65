// Yen amounts and dates rendered the way Japanese readers expect them.
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::FormatError;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

const MAN: i64 = 10_000;
const HYAKUMAN: i64 = 1_000_000;
const SENMAN: i64 = 10_000_000;
const OKU: i64 = 100_000_000;

fn check_amount(amount: i64) -> Result<u64, FormatError> {
    u64::try_from(amount).map_err(|_| FormatError::InvalidAmount(amount))
}

// 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount as `"150,000円"`.
pub fn format_currency(amount: i64) -> Result<String, FormatError> {
    let value = check_amount(amount)?;
    Ok(format!("{}円", group_thousands(value)))
}

/// Formats an amount in currency style with the full-width yen sign, `"￥150,000"`.
pub fn format_currency_symbol(amount: i64) -> Result<String, FormatError> {
    let value = check_amount(amount)?;
    Ok(format!("￥{}", group_thousands(value)))
}

/// Compresses large amounts into Japanese units. Division truncates, so
/// 159,999 yen is `"15万円"`, not 16.
pub fn format_currency_short(amount: i64) -> Result<String, FormatError> {
    let value = check_amount(amount)?;
    let text = if amount >= OKU {
        format!("{}千万円", amount / SENMAN)
    } else if amount >= SENMAN {
        format!("{}百万円", amount / HYAKUMAN)
    } else if amount >= MAN {
        format!("{}万円", amount / MAN)
    } else {
        format!("{}円", group_thousands(value))
    };
    Ok(text)
}

/// Parses the output of [`format_currency`] or [`format_currency_symbol`]
/// back into an amount.
pub fn parse_currency(text: &str) -> Result<i64, FormatError> {
    let invalid = || FormatError::InvalidCurrency(text.to_string());
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix('￥')
        .or_else(|| trimmed.strip_prefix('¥'))
        .unwrap_or(trimmed);
    let body = body.strip_suffix('円').unwrap_or(body).trim();

    let digits: String = body.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse::<i64>().map_err(|_| invalid())
}

/// `"2025年3月31日"`
pub fn format_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date taken in UTC).
pub fn parse_date(text: &str) -> Result<NaiveDate, FormatError> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| FormatError::InvalidDate(text.to_string()))
}

/// Whole days until the deadline (taken as midnight UTC), rounded up. A
/// deadline later today gives 0; a past deadline gives a negative count.
pub fn days_remaining(deadline: NaiveDate, now: NaiveDateTime) -> i64 {
    let diff_ms = (deadline.and_time(NaiveTime::MIN) - now).num_milliseconds();
    // ceil(a / b) == -floor(-a / b)
    -(-diff_ms).div_euclid(DAY_MS)
}

/// Calendar-day difference between two dates.
pub fn days_until(deadline: NaiveDate, today: NaiveDate) -> i64 {
    deadline.signed_duration_since(today).num_days()
}

/// Short relative label for comment and update timestamps: `"たった今"`,
/// `"30分前"`, `"1時間前"`, `"2日前"`, `"1週間前"`, falling back to the
/// full date after four weeks.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - timestamp).num_seconds();
    match elapsed {
        s if s < 60 => "たった今".to_string(),
        s if s < 60 * 60 => format!("{}分前", s / 60),
        s if s < 24 * 60 * 60 => format!("{}時間前", s / (60 * 60)),
        s if s < 7 * 24 * 60 * 60 => format!("{}日前", s / (24 * 60 * 60)),
        s if s < 28 * 24 * 60 * 60 => format!("{}週間前", s / (7 * 24 * 60 * 60)),
        _ => format_date(timestamp.date_naive()),
    }
}
