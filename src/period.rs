use std::ops::{Bound, RangeBounds};

use crate::date::{Date, Weekday};
use crate::Error;

/// Inclusive span of days. `start <= end` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: Date,
    end: Date,
}

impl Period {
    pub fn new(start: impl Into<Date>, end: impl Into<Date>) -> Result<Self, Error> {
        let (start, end) = (start.into(), end.into());
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Period { start, end })
    }

    #[inline]
    pub fn single(date: impl Into<Date>) -> Self {
        let date = date.into();
        Period {
            start: date,
            end: date,
        }
    }

    /// Builds a period from `a..=b` or `a..b` style ranges.
    ///
    /// Both ends must be bounded; an empty range such as `a..a` is rejected.
    pub fn from_range<D, R>(value: R) -> Result<Self, Error>
    where
        D: Into<Date> + Clone,
        R: RangeBounds<D>,
    {
        let start: Date = match value.start_bound() {
            Bound::Included(it) => it.clone().into(),
            Bound::Excluded(it) => Into::<Date>::into(it.clone()).add_days(1),
            Bound::Unbounded => return Err(Error::UnboundedRange),
        };

        let end: Date = match value.end_bound() {
            Bound::Included(it) => it.clone().into(),
            Bound::Excluded(it) => Into::<Date>::into(it.clone()).add_days(-1),
            Bound::Unbounded => return Err(Error::UnboundedRange),
        };

        Period::new(start, end)
    }

    #[inline]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of days in the period, both ends included.
    #[inline]
    pub const fn len_days(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    #[inline]
    pub fn contains(&self, date: impl Into<Date>) -> bool {
        let date = date.into();
        self.start <= date && date <= self.end
    }

    /// Calendar years touched by the period.
    #[inline]
    pub fn years(&self) -> std::ops::RangeInclusive<isize> {
        self.start.year()..=self.end.year()
    }

    /// How many times `weekday` occurs in the period.
    pub fn count_weekday(&self, weekday: Weekday) -> usize {
        let mut first = self.start;
        while first.weekday() != weekday {
            if first >= self.end {
                return 0;
            }
            first = first.add_days(1);
        }

        (self.end.days_since(&first) / 7) as usize + 1
    }

    pub fn days(&self) -> Days {
        Days {
            next: self.start,
            end: self.end,
        }
    }
}

impl<D: Into<Date> + Clone> TryFrom<std::ops::RangeInclusive<D>> for Period {
    type Error = Error;

    #[inline]
    fn try_from(value: std::ops::RangeInclusive<D>) -> Result<Self, Self::Error> {
        Period::from_range(value)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Iterator over the days of a [`Period`].
pub struct Days {
    next: Date,
    end: Date,
}

impl Iterator for Days {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let current = self.next;
        self.next = current.add_days(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end.days_since(&self.next) + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: isize, m: usize, d: usize) -> Date {
        Date::from_ymd(y, m, d)
    }

    #[test]
    fn rejects_reversed_dates() {
        assert_eq!(
            Period::new(ymd(2023, 2, 6), ymd(2023, 2, 5)),
            Err(Error::InvalidRange {
                start: ymd(2023, 2, 6),
                end: ymd(2023, 2, 5)
            })
        );
    }

    #[test]
    fn from_ranges() {
        let inclusive = Period::from_range(ymd(2023, 2, 13)..=ymd(2023, 2, 19)).unwrap();
        let exclusive = Period::from_range(ymd(2023, 2, 13)..ymd(2023, 2, 20)).unwrap();
        assert_eq!(inclusive, exclusive);
        assert_eq!(inclusive.len_days(), 7);
        assert_eq!(Period::try_from(ymd(2023, 2, 13)..=ymd(2023, 2, 19)), Ok(inclusive));

        assert_eq!(
            Period::from_range(ymd(2023, 2, 13)..),
            Err(Error::UnboundedRange)
        );
        assert_eq!(Period::from_range(..=ymd(2023, 2, 13)), Err(Error::UnboundedRange));
        assert!(Period::from_range(ymd(2023, 2, 13)..ymd(2023, 2, 13)).is_err());
    }

    #[test]
    fn years_and_days() {
        let period = Period::new(ymd(2022, 12, 30), ymd(2023, 1, 2)).unwrap();
        assert_eq!(period.years(), 2022..=2023);
        assert_eq!(period.days().len(), 4);
        assert_eq!(
            period.days().collect::<Vec<_>>(),
            vec![
                ymd(2022, 12, 30),
                ymd(2022, 12, 31),
                ymd(2023, 1, 1),
                ymd(2023, 1, 2)
            ]
        );
        assert!(period.contains(ymd(2023, 1, 1)));
        assert!(!period.contains(ymd(2023, 1, 3)));
        assert_eq!(period.to_string(), "2022-12-30..=2023-01-02");
    }

    #[test]
    fn counts_sundays() {
        // 2023-02-12 is a Sunday
        let sunday = ymd(2023, 2, 12);
        assert_eq!(Period::single(sunday).count_weekday(Weekday::Sunday), 1);
        assert_eq!(
            Period::single(sunday.add_days(1)).count_weekday(Weekday::Sunday),
            0
        );
        let cases = [(0, 6, 0), (0, 7, 1), (-1, 0, 1), (0, 13, 1), (0, 14, 2), (-1, 14, 3)];
        for (from, to, expected) in cases {
            let period = Period::new(sunday.add_days(from + 1), sunday.add_days(to)).unwrap();
            assert_eq!(period.count_weekday(Weekday::Sunday), expected, "{period}");
        }
    }

    proptest! {
        #[test]
        fn weekday_count_matches_day_scan(start in 18_000isize..20_000, len in 0isize..120) {
            let period = Period::new(Date(start), Date(start + len)).unwrap();
            for weekday in [Weekday::Monday, Weekday::Friday, Weekday::Sunday] {
                let scanned = period.days().filter(|d| d.weekday() == weekday).count();
                prop_assert_eq!(period.count_weekday(weekday), scanned);
            }
        }
    }
}
