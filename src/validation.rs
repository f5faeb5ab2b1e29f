use crate::date::Date;
use crate::period::Period;
use crate::Error;

/// Maximum value of `end - start` in days.
pub const MAX_PERIOD_LENGTH: isize = 50;

/// A single reason why a leave period was rejected.
///
/// Every variant renders to a non-empty message through `Display`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("period length of {length} days exceeds the maximum of {max} days")]
    PeriodTooLong { length: isize, max: isize },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: Date, end: Date },
    #[error("period {start}..={end} spans more than one holiday year")]
    SpansHolidayYears { start: Date, end: Date },
    #[error("input \"{input}\" is not a valid date range: {reason}")]
    MalformedInput { input: String, reason: String },
}

impl ValidationError {
    #[inline]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Success,
    Error,
}

/// Accumulated result of validating a period.
///
/// The status is derived from the error list: an outcome without errors is a
/// success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    #[inline]
    pub fn success() -> Self {
        Self::default()
    }

    #[inline]
    pub fn status(&self) -> ValidationStatus {
        if self.errors.is_empty() {
            ValidationStatus::Success
        } else {
            ValidationStatus::Error
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::message).collect()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// `Ok(())` on success, otherwise [`Error::InvalidInput`] with every error.
    pub fn into_result(self) -> Result<(), Error> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(self.errors))
        }
    }
}

impl Extend<ValidationError> for ValidationOutcome {
    fn extend<T: IntoIterator<Item = ValidationError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationOutcome {
    fn from_iter<T: IntoIterator<Item = ValidationError>>(iter: T) -> Self {
        ValidationOutcome {
            errors: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ValidationError>> for ValidationOutcome {
    #[inline]
    fn from(errors: Vec<ValidationError>) -> Self {
        ValidationOutcome { errors }
    }
}

impl IntoIterator for ValidationOutcome {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Checks whether a leave period may be planned.
pub trait Validator {
    fn validate(&self, start: Date, end: Date) -> ValidationOutcome;
}

impl<T: Validator + ?Sized> Validator for &T {
    fn validate(&self, start: Date, end: Date) -> ValidationOutcome {
        (**self).validate(start, end)
    }
}

/// Length, chronology and holiday-year rules for leave periods.
///
/// A holiday year starts on April 1st by default and runs until the day
/// before the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodValidator {
    max_length: isize,
    year_start_month: usize,
    year_start_day: usize,
}

impl Default for PeriodValidator {
    fn default() -> Self {
        PeriodValidator {
            max_length: MAX_PERIOD_LENGTH,
            year_start_month: 4,
            year_start_day: 1,
        }
    }
}

impl PeriodValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, days: isize) -> Self {
        self.max_length = days;
        self
    }

    /// Fails if `month`/`day` is not a date that exists in every year.
    pub fn with_holiday_year_start(mut self, month: usize, day: usize) -> Result<Self, Error> {
        // 2001 is not a leap year, so February 29th is rejected.
        Date::try_from_ymd(2001, month, day)?;
        self.year_start_month = month;
        self.year_start_day = day;
        Ok(self)
    }

    #[inline]
    pub fn max_length(&self) -> isize {
        self.max_length
    }

    /// First day of the holiday year that starts in `year`.
    #[inline]
    pub fn holiday_year_start(&self, year: isize) -> Date {
        Date::from_ymd(year, self.year_start_month, self.year_start_day)
    }

    fn check_length(&self, start: Date, end: Date) -> Option<ValidationError> {
        let length = end.days_since(&start);
        (length > self.max_length).then_some(ValidationError::PeriodTooLong {
            length,
            max: self.max_length,
        })
    }

    fn check_chronology(&self, start: Date, end: Date) -> Option<ValidationError> {
        (end < start).then_some(ValidationError::EndBeforeStart { start, end })
    }

    fn check_holiday_year_overlap(&self, period: Period) -> Option<ValidationError> {
        let (start, end) = (period.start(), period.end());
        let error = ValidationError::SpansHolidayYears { start, end };

        if end.year() - start.year() > 1 {
            return Some(error);
        }

        let mut boundaries = vec![self.holiday_year_start(start.year())];
        if end.year() != start.year() {
            boundaries.push(self.holiday_year_start(end.year()));
        }

        // A boundary on the start day belongs to the period; one on the end day
        // means the last day is already in the next holiday year.
        boundaries
            .into_iter()
            .any(|boundary| boundary > start && boundary <= end)
            .then_some(error)
    }
}

impl Validator for PeriodValidator {
    fn validate(&self, start: Date, end: Date) -> ValidationOutcome {
        // Reversed input is reported by the chronology check and has no holiday year.
        let overlap = match Period::new(start, end) {
            Ok(period) => self.check_holiday_year_overlap(period),
            Err(_) => {
                debug_assert!(end < start);
                None
            }
        };

        let mut outcome = ValidationOutcome::success();
        let checks = [
            self.check_length(start, end),
            self.check_chronology(start, end),
            overlap,
        ];
        for error in checks.into_iter().flatten() {
            outcome.push(error);
        }

        if !outcome.is_success() {
            log::debug!(
                "period {start}..={end} rejected with {} error(s)",
                outcome.error_count()
            );
        }
        outcome
    }
}
