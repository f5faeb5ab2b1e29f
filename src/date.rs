use crate::calendar::HolidayCalendar;
use crate::Error;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    const fn from_monday_index(n: isize) -> Self {
        match n {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.pad(name)
    }
}

/// A calendar day without time of day.
///
/// Every conversion from a type that carries a time component drops that
/// component, so comparisons and differences are always whole days.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) isize,
);

/// Offset between 0000-03-01 and the UNIX epoch in days.
const EPOCH_SHIFT: isize = 719468;
/// `chrono` counts days from 0001-01-01 as day 1.
#[cfg(feature = "chrono")]
const CE_DAYS_AT_EPOCH: isize = 719163;
#[cfg(feature = "time")]
const JULIAN_DAY_AT_EPOCH: isize = 2440588;

impl Date {
    /// Builds a date without checking that `month` and `day` exist.
    ///
    /// Out-of-range components roll over the same way the civil algorithm
    /// does; use [`Date::try_from_ymd`] for untrusted input.
    pub const fn from_ymd(year: isize, month: usize, day: usize) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let m = month as isize;
        let d = day as isize;

        let adjusted_year = year - if m <= 2 { 1 } else { 0 };

        let era = if adjusted_year >= 0 {
            adjusted_year / 400
        } else {
            (adjusted_year - 399) / 400
        };

        let year_of_era = adjusted_year - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        Self(era * 146097 + day_of_era - EPOCH_SHIFT)
    }

    pub fn try_from_ymd(year: isize, month: usize, day: usize) -> Result<Self, Error> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(Error::InvalidDate { year, month, day });
        }
        Ok(Self::from_ymd(year, month, day))
    }

    pub const fn ymd(&self) -> (isize, usize, usize) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let shifted = self.0 + EPOCH_SHIFT;
        let era = (if shifted >= 0 {
            shifted
        } else {
            shifted - 146096
        }) / 146097;

        let day_of_era = shifted - era * 146097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = if month_part < 10 {
            month_part + 3
        } else {
            month_part - 9
        };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        (year, month as usize, day as usize)
    }

    #[inline]
    pub const fn year(&self) -> isize {
        self.ymd().0
    }

    #[inline]
    pub const fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday
        Weekday::from_monday_index((self.0 + 3).rem_euclid(7))
    }

    #[inline]
    pub const fn is_sunday(&self) -> bool {
        matches!(self.weekday(), Weekday::Sunday)
    }

    #[inline]
    pub const fn add_days(self, days: isize) -> Self {
        Self(self.0 + days)
    }

    /// Signed number of days from `other` to `self`.
    #[inline]
    pub const fn days_since(&self, other: &Self) -> isize {
        self.0 - other.0
    }
}

pub const fn is_leap_year(year: isize) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub const fn days_in_month(year: isize, month: usize) -> usize {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

const SECONDS_IN_DAY: isize = 86400;

impl TryFrom<Date> for std::time::SystemTime {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let secs = (value.0.unsigned_abs() as u64)
            .checked_mul(SECONDS_IN_DAY as u64)
            .ok_or(crate::Error::DateTooLarge)?;
        let offset = std::time::Duration::from_secs(secs);

        if value.0 >= 0 {
            std::time::SystemTime::UNIX_EPOCH.checked_add(offset)
        } else {
            std::time::SystemTime::UNIX_EPOCH.checked_sub(offset)
        }
        .ok_or(crate::Error::DateTooLarge)
    }
}

impl From<std::time::SystemTime> for Date {
    fn from(value: std::time::SystemTime) -> Self {
        let secs = match value.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => duration.as_secs() as isize,
            Err(err) => {
                let before = err.duration();
                let partial = if before.subsec_nanos() > 0 { 1 } else { 0 };
                -(before.as_secs() as isize + partial)
            }
        };

        Date(secs.div_euclid(SECONDS_IN_DAY))
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let days = value
            .0
            .checked_add(CE_DAYS_AT_EPOCH)
            .and_then(|it| i32::try_from(it).ok())
            .ok_or(crate::Error::DateTooLarge)?;
        chrono::NaiveDate::from_num_days_from_ce_opt(days).ok_or(crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Utc> {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateTooLarge)?;

        Ok(chrono::TimeZone::from_utc_datetime(&chrono::Utc, &naive))
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Local> {
    type Error = crate::Error;

    /// Local midnight of the date. Fails if midnight does not exist locally.
    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateTooLarge)?;

        chrono::TimeZone::from_local_datetime(&chrono::Local, &naive)
            .earliest()
            .ok_or(crate::Error::DateTooLarge)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        Date(chrono::Datelike::num_days_from_ce(&value) as isize - CE_DAYS_AT_EPOCH)
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::NaiveDateTime> for Date {
    #[inline]
    fn from(value: chrono::NaiveDateTime) -> Self {
        Date::from(value.date())
    }
}
#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for Date {
    /// Uses the calendar day as seen in the value's own time zone.
    #[inline]
    fn from(value: chrono::DateTime<Tz>) -> Self {
        Date::from(value.naive_local().date())
    }
}

#[cfg(feature = "time")]
impl TryFrom<Date> for time::Date {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let julian_day = value
            .0
            .checked_add(JULIAN_DAY_AT_EPOCH)
            .and_then(|it| i32::try_from(it).ok())
            .ok_or(crate::Error::DateTooLarge)?;
        time::Date::from_julian_day(julian_day).map_err(|_| crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "time")]
impl From<time::Date> for Date {
    #[inline]
    fn from(value: time::Date) -> Self {
        Date(value.to_julian_day() as isize - JULIAN_DAY_AT_EPOCH)
    }
}
#[cfg(feature = "time")]
impl From<time::PrimitiveDateTime> for Date {
    #[inline]
    fn from(value: time::PrimitiveDateTime) -> Self {
        Date::from(value.date())
    }
}
#[cfg(feature = "time")]
impl From<time::OffsetDateTime> for Date {
    #[inline]
    fn from(value: time::OffsetDateTime) -> Self {
        Date::from(value.date())
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

pub trait DateExt: Into<Date> + Clone {
    fn is_national_holiday(&self, calendar: &HolidayCalendar) -> Result<bool, Error> {
        calendar.is_holiday(self.clone())
    }

    fn is_sunday(&self) -> bool {
        Into::<Date>::into(self.clone()).is_sunday()
    }
}

impl DateExt for Date {}
impl DateExt for std::time::SystemTime {}

#[cfg(feature = "chrono")]
impl DateExt for chrono::NaiveDate {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::NaiveDateTime {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Utc> {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Local> {}

#[cfg(feature = "time")]
impl DateExt for time::Date {}
#[cfg(feature = "time")]
impl DateExt for time::PrimitiveDateTime {}
#[cfg(feature = "time")]
impl DateExt for time::OffsetDateTime {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(Date::from_ymd(1970, 1, 1), Date(0));
        assert_eq!(Date(0).ymd(), (1970, 1, 1));
        assert_eq!(Date(0).weekday(), Weekday::Thursday);
    }

    #[test]
    fn known_weekdays() {
        assert_eq!(Date::from_ymd(2023, 2, 12).weekday(), Weekday::Sunday);
        assert_eq!(Date::from_ymd(2023, 2, 13).weekday(), Weekday::Monday);
        assert_eq!(Date::from_ymd(2023, 4, 7).weekday(), Weekday::Friday);
        assert_eq!(Date::from_ymd(1969, 12, 31).weekday(), Weekday::Wednesday);
        assert!(Date::from_ymd(2023, 1, 1).is_sunday());
    }

    #[test]
    fn day_arithmetic() {
        let d = Date::from_ymd(2023, 2, 28);
        assert_eq!(d.add_days(1), Date::from_ymd(2023, 3, 1));
        assert_eq!(Date::from_ymd(2024, 2, 28).add_days(1).ymd(), (2024, 2, 29));
        assert_eq!(Date::from_ymd(2023, 3, 1).days_since(&d), 1);
        assert_eq!(d.days_since(&Date::from_ymd(2023, 3, 1)), -1);
    }

    #[test]
    fn checked_construction() {
        assert!(Date::try_from_ymd(2024, 2, 29).is_ok());
        assert_eq!(
            Date::try_from_ymd(2023, 2, 29),
            Err(Error::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(Date::try_from_ymd(2023, 13, 1).is_err());
        assert!(Date::try_from_ymd(2023, 4, 0).is_err());
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(Date::from_ymd(2023, 4, 7).to_string(), "2023-04-07");
        assert_eq!(format!("{:?}", Date::from_ymd(2023, 4, 7)), "Date(2023-04-07)");
    }

    #[test]
    fn system_time_drops_time_of_day() {
        let noon = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(43_200);
        assert_eq!(Date::from(noon), Date(0));

        let before = std::time::SystemTime::UNIX_EPOCH - std::time::Duration::from_secs(1);
        assert_eq!(Date::from(before), Date(-1));

        let back = std::time::SystemTime::try_from(Date(-3)).unwrap();
        assert_eq!(Date::from(back), Date(-3));
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn chrono_conversions() {
        let naive = chrono::NaiveDate::from_ymd_opt(2023, 4, 7).unwrap();
        let date = Date::from(naive);
        assert_eq!(date, Date::from_ymd(2023, 4, 7));
        assert_eq!(chrono::NaiveDate::try_from(date).unwrap(), naive);

        let late = naive.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(Date::from(late), date);
        assert_eq!(Date::from(late.and_utc()), date);
    }

    #[cfg(feature = "time")]
    #[test]
    fn time_conversions() {
        let day = time::Date::from_calendar_date(2023, time::Month::April, 7).unwrap();
        let date = Date::from(day);
        assert_eq!(date, Date::from_ymd(2023, 4, 7));
        assert_eq!(time::Date::try_from(date).unwrap(), day);

        let evening = day.with_hms(21, 30, 0).unwrap();
        assert_eq!(Date::from(evening), date);
    }

    proptest! {
        #[test]
        fn ymd_round_trips(days in -1_000_000isize..1_000_000) {
            let date = Date(days);
            let (y, m, d) = date.ymd();
            prop_assert_eq!(Date::from_ymd(y, m, d), date);
            prop_assert!(Date::try_from_ymd(y, m, d).is_ok());
        }

        #[test]
        fn weekday_advances_by_one(days in -1_000_000isize..1_000_000) {
            let today = Date(days).weekday() as u8;
            let tomorrow = Date(days + 1).weekday() as u8;
            prop_assert_eq!((today + 1) % 7, tomorrow);
        }
    }
}
