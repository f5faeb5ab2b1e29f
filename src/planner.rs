use crate::calendar::{HolidayCalendar, HolidayProvider};
use crate::date::{Date, Weekday};
use crate::period::Period;
use crate::validation::{PeriodValidator, Validator};
use crate::Error;

#[cfg(feature = "chrono")]
use crate::parser::DateRangeParser;
#[cfg(feature = "chrono")]
use crate::validation::ValidationError;

/// Calculates how many vacation days a leave period consumes.
///
/// Sundays and national holidays inside the period are free; a holiday that
/// falls on a Sunday is only excluded once.
pub struct HolidayPlanner<P = HolidayCalendar, V = PeriodValidator> {
    provider: P,
    validator: V,
    #[cfg(feature = "chrono")]
    parser: DateRangeParser,
}

impl HolidayPlanner {
    /// Finnish holidays, default period rules and `-` separated Finnish dates.
    pub fn new() -> Self {
        Self::with_parts(HolidayCalendar::new(), PeriodValidator::new())
    }
}

impl Default for HolidayPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HolidayProvider, V: Validator> HolidayPlanner<P, V> {
    pub fn with_parts(provider: P, validator: V) -> Self {
        HolidayPlanner {
            provider,
            validator,
            #[cfg(feature = "chrono")]
            parser: DateRangeParser::default(),
        }
    }

    #[cfg(feature = "chrono")]
    pub fn with_parser(mut self, parser: DateRangeParser) -> Self {
        self.parser = parser;
        self
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Vacation days consumed by leave from `start` to `end`, both included.
    ///
    /// Fails with [`Error::InvalidInput`] listing every validation problem, or
    /// with [`Error::YearNotAvailable`] if the holidays of a touched year are
    /// unknown.
    pub fn spent_days(&self, start: impl Into<Date>, end: impl Into<Date>) -> Result<usize, Error> {
        let (start, end) = (start.into(), end.into());

        self.validator.validate(start, end).into_result()?;
        let period = Period::new(start, end)?;

        let total = period.len_days();
        let sundays = period.count_weekday(Weekday::Sunday);
        let holidays = self
            .provider
            .holidays_between(period.start(), period.end())?
            .into_iter()
            .filter(|it| !it.is_sunday())
            .count();

        log::debug!(
            "{period}: {total} days, {sundays} Sundays, {holidays} holidays on other days ({})",
            self.provider.locale()
        );

        total
            .checked_sub(sundays + holidays)
            .ok_or(Error::ExcludedDaysExceedPeriod {
                days: total,
                excluded: sundays + holidays,
            })
    }

    /// Same as [`HolidayPlanner::spent_days`] for text such as
    /// `1.6.2023 - 14.6.2023`.
    ///
    /// Text that does not parse is reported as [`Error::InvalidInput`].
    #[cfg(feature = "chrono")]
    pub fn spent_days_in(&self, input: &str) -> Result<usize, Error> {
        let (start, end) = self.parser.parse(input).map_err(|err| {
            Error::InvalidInput(vec![ValidationError::MalformedInput {
                input: input.to_string(),
                reason: err.to_string(),
            }])
        })?;
        self.spent_days(start, end)
    }
}
