use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::date::{Date, Weekday};
use crate::{Error, Holiday};

/// Source of national holidays for a single locale.
pub trait HolidayProvider {
    /// Locale code of the holidays this provider knows about.
    fn locale(&self) -> &str;

    /// All national holidays within `start..=end`, ascending.
    ///
    /// Fails with [`Error::InvalidRange`] if `start` is after `end`.
    fn holidays_between(&self, start: Date, end: Date) -> Result<Vec<Date>, Error>;
}

impl<T: HolidayProvider + ?Sized> HolidayProvider for &T {
    fn locale(&self) -> &str {
        (**self).locale()
    }

    fn holidays_between(&self, start: Date, end: Date) -> Result<Vec<Date>, Error> {
        (**self).holidays_between(start, end)
    }
}

/// Finnish national holiday calendar.
///
/// Holidays of a year are computed on first request and kept for the lifetime
/// of the calendar. Share one instance instead of creating calendars per call.
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    cache: RwLock<HashMap<isize, Arc<[Holiday]>>>,
}

impl HolidayCalendar {
    pub const LOCALE: &'static str = "FI";

    pub fn new() -> Self {
        Self::default()
    }

    /// Years for which holidays can be computed.
    pub const fn supported_years() -> std::ops::RangeInclusive<isize> {
        crate::data::year_range()
    }

    /// Holidays of `year`, sorted and without duplicate dates.
    pub fn holidays_for_year(&self, year: isize) -> Result<Arc<[Holiday]>, Error> {
        if let Some(cached) = self.cache.read().get(&year) {
            log::trace!("holiday cache hit for {year}");
            return Ok(Arc::clone(cached));
        }

        let computed: Arc<[Holiday]> = compute_year(year)?.into();
        log::debug!("computed {} holidays for {year}", computed.len());

        let mut cache = self.cache.write();
        Ok(Arc::clone(cache.entry(year).or_insert(computed)))
    }

    /// Holidays within `start..=end` with their names, ascending.
    pub fn holidays_in(
        &self,
        start: impl Into<Date>,
        end: impl Into<Date>,
    ) -> Result<Vec<Holiday>, Error> {
        let (start, end) = (start.into(), end.into());
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }

        let mut result = Vec::new();
        for year in start.year()..=end.year() {
            let holidays = self.holidays_for_year(year)?;
            result.extend(
                holidays
                    .iter()
                    .filter(|it| it.date >= start && it.date <= end)
                    .copied(),
            );
        }
        Ok(result)
    }

    pub fn is_holiday(&self, date: impl Into<Date>) -> Result<bool, Error> {
        let date = date.into();
        let holidays = self.holidays_for_year(date.year())?;
        Ok(holidays.binary_search_by(|it| it.date.cmp(&date)).is_ok())
    }

    /// Years currently held in the cache, ascending.
    pub fn cached_years(&self) -> Vec<isize> {
        let mut years: Vec<_> = self.cache.read().keys().copied().collect();
        years.sort_unstable();
        years
    }
}

impl HolidayProvider for HolidayCalendar {
    fn locale(&self) -> &str {
        Self::LOCALE
    }

    fn holidays_between(&self, start: Date, end: Date) -> Result<Vec<Date>, Error> {
        Ok(self
            .holidays_in(start, end)?
            .into_iter()
            .map(|it| it.date)
            .collect())
    }
}

fn compute_year(year: isize) -> Result<Vec<Holiday>, Error> {
    let good_friday = crate::data::good_friday(year).ok_or(Error::YearNotAvailable(year))?;

    let fixed = |month, day, name| Holiday {
        date: Date::from_ymd(year, month, day),
        name,
    };
    let moved = |offset, name| Holiday {
        date: good_friday.add_days(offset),
        name,
    };

    let midsummer_eve = first_on_or_after(Date::from_ymd(year, 6, 19), Weekday::Friday);
    let all_saints = first_on_or_after(Date::from_ymd(year, 10, 31), Weekday::Saturday);

    let mut holidays = vec![
        fixed(1, 1, "New Year's Day"),
        fixed(1, 6, "Epiphany"),
        fixed(5, 1, "May Day"),
        fixed(12, 6, "Independence Day"),
        fixed(12, 24, "Christmas Eve"),
        fixed(12, 25, "Christmas Day"),
        fixed(12, 26, "Boxing Day"),
        moved(0, "Good Friday"),
        moved(2, "Easter Sunday"),
        moved(3, "Easter Monday"),
        moved(41, "Ascension Day"),
        moved(51, "Whitsunday"),
        Holiday {
            date: midsummer_eve,
            name: "Midsummer Eve",
        },
        Holiday {
            date: midsummer_eve.add_days(1),
            name: "Midsummer Day",
        },
        Holiday {
            date: all_saints,
            name: "All Saints' Day",
        },
    ];

    // Stable sort keeps the fixed-date name when a moveable feast lands on it.
    holidays.sort_by_key(|it| it.date);
    holidays.dedup_by_key(|it| it.date);
    Ok(holidays)
}

fn first_on_or_after(mut date: Date, weekday: Weekday) -> Date {
    while date.weekday() != weekday {
        date = date.add_days(1);
    }
    date
}
