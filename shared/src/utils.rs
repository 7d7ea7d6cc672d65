// Pure formatting and calculation helpers shared by the engine and the UI.
// Everything here is synchronous and side-effect free.

pub mod japanese_format;
pub mod progress;
pub mod schooling;

use thiserror::Error;

pub use japanese_format::{
    days_remaining, days_until, format_currency, format_currency_short, format_currency_symbol,
    format_date, format_relative_time, parse_currency, parse_date,
};
pub use progress::{format_percent, format_progress, progress_percent};
pub use schooling::{grade_for_age, investment_years_remaining, SchoolGrade, GRADUATION_AGE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid amount: {0} (amounts must not be negative)")]
    InvalidAmount(i64),

    #[error("Invalid target amount: {0} (target must be greater than 0)")]
    InvalidTarget(i64),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Invalid currency text '{0}'")]
    InvalidCurrency(String),
}
