use chrono::NaiveDate;
use holiday_planner::{DateExt, HolidayCalendar, HolidayPlanner};

fn main() -> anyhow::Result<()> {
    let start = NaiveDate::from_ymd_opt(2023, 4, 3).expect("Invalid date");
    let end = NaiveDate::from_ymd_opt(2023, 4, 16).expect("Invalid date");

    let planner = HolidayPlanner::new();
    println!(
        "Leave from {start} to {end} consumes {} vacation days",
        planner.spent_days(start, end)?
    );

    let calendar = HolidayCalendar::new();
    let good_friday = NaiveDate::from_ymd_opt(2023, 4, 7).expect("Invalid date");
    println!(
        "Is {good_friday} a holiday in Finland? Answer is {}",
        good_friday.is_national_holiday(&calendar)?
    );

    println!("{}", planner.spent_days_in("1.6.2023 - 14.6.2023")?);

    Ok(())
}
