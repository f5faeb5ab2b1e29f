use crate::date::Date;

include!(concat!(env!("OUT_DIR"), "/good_friday_data.rs"));

/// Good Friday of `year`, if the compiled-in table covers it.
pub(crate) fn good_friday(year: isize) -> Option<Date> {
    if !(DATA_MIN_YEAR..=DATA_MAX_YEAR).contains(&year) {
        return None;
    }
    let key = i32::try_from(year).ok()?;
    GOOD_FRIDAYS.get(&key).copied()
}

pub(crate) const fn year_range() -> std::ops::RangeInclusive<isize> {
    DATA_MIN_YEAR..=DATA_MAX_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Weekday;

    #[test]
    fn table_covers_known_years() {
        assert_eq!(good_friday(2020), Some(Date::from_ymd(2020, 4, 10)));
        assert_eq!(good_friday(2023), Some(Date::from_ymd(2023, 4, 7)));
        assert_eq!(good_friday(2024), Some(Date::from_ymd(2024, 3, 29)));
        assert_eq!(good_friday(DATA_MIN_YEAR - 1), None);
        assert_eq!(good_friday(DATA_MAX_YEAR + 1), None);
    }

    #[test]
    fn every_entry_is_a_friday_in_its_year() {
        for year in year_range() {
            let gf = good_friday(year).unwrap();
            assert_eq!(gf.weekday(), Weekday::Friday, "{gf}");
            assert_eq!(gf.year(), year);
        }
    }
}
