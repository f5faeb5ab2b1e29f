use holiday_planner::HolidayCalendar;

fn main() {
    let calendar = HolidayCalendar::new();
    let year = std::env::args()
        .nth(1)
        .and_then(|it| it.parse().ok())
        .unwrap_or(2023);

    match calendar.holidays_for_year(year) {
        Ok(holidays) => {
            for holiday in holidays.iter() {
                println!("{} {:<10} {}", holiday.date, holiday.date.weekday(), holiday.name);
            }
        }
        Err(err) => eprintln!("{err} (supported: {:?})", HolidayCalendar::supported_years()),
    }
}
