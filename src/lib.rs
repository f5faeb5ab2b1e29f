mod calendar;
mod data;
mod date;
#[cfg(feature = "chrono")]
pub mod parser;
mod period;
mod planner;
pub mod validation;

pub use calendar::{HolidayCalendar, HolidayProvider};
pub use date::{Date, DateExt, Weekday};
pub use period::{Days, Period};
pub use planner::HolidayPlanner;
pub use validation::{
    PeriodValidator, ValidationError, ValidationOutcome, ValidationStatus, Validator,
};

/// Represents a national holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    /// Date of holiday.
    pub date: Date,
    /// English name of holiday.
    pub name: &'static str,
}

/// Vacation days consumed by leave from `start` to `end` under the default
/// rules.
///
/// Builds a fresh [`HolidayPlanner`] on every call; keep a planner around when
/// calculating more than once so the holiday cache is reused.
pub fn spent_days(start: impl Into<Date>, end: impl Into<Date>) -> Result<usize, Error> {
    HolidayPlanner::new().spent_days(start, end)
}

/// Checks a leave period from `start` to `end` against the default rules.
#[inline]
pub fn validate(start: impl Into<Date>, end: impl Into<Date>) -> ValidationOutcome {
    PeriodValidator::new().validate(start.into(), end.into())
}

/// Error states the holiday planner might encounter.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The period was rejected; every detected problem is listed.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// Holidays are not available for this year.
    #[error("holidays are not available for year {0}")]
    YearNotAvailable(isize),
    /// Start date comes after end date.
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: Date, end: Date },
    /// A range is missing its start or end.
    #[error("date range must be bounded on both ends")]
    UnboundedRange,
    /// Components do not form a calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid date")]
    InvalidDate {
        year: isize,
        month: usize,
        day: usize,
    },
    /// Conversion to another date format is not supported.
    #[error("Date is too large for conversion")]
    DateTooLarge,
    /// Sundays and holidays outnumber the days of the period, which means the
    /// holiday provider returned dates outside the period or duplicates.
    #[error("{excluded} excluded days exceed the {days} days of the period")]
    ExcludedDaysExceedPeriod { days: usize, excluded: usize },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_lists_every_message() {
        let start = Date::from_ymd(2023, 2, 15);
        let end = start.add_days(100);
        let err = spent_days(start, end).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid input: "), "{message}");
        assert!(message.contains("100 days"), "{message}");
        assert!(message.contains("more than one holiday year"), "{message}");
    }

    #[test]
    fn top_level_helpers() {
        assert_eq!(
            spent_days(Date::from_ymd(2023, 2, 13), Date::from_ymd(2023, 2, 20)),
            Ok(7)
        );
        assert!(validate(Date::from_ymd(2023, 4, 1), Date::from_ymd(2023, 4, 1)).is_success());
        assert!(!validate(Date::from_ymd(2023, 3, 31), Date::from_ymd(2023, 4, 1)).is_success());
    }
}
