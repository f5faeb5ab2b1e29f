use csv::StringRecord;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

// These numbers should be more conservative to reduce compile time
const DEFAULT_MIN_YEAR: i32 = 2000;
const DEFAULT_MAX_YEAR: i32 = 2035;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct GoodFriday {
    year: i32,
    month: u8,
    day: u8,
    day_index: isize,
}

pub const fn ymd_as_isize(y: isize, m: isize, d: isize) -> isize {
    // Source: https://howardhinnant.github.io/date_algorithms.html
    let adjusted_year = y - if m <= 2 { 1 } else { 0 };

    let era = if adjusted_year >= 0 {
        adjusted_year / 400
    } else {
        (adjusted_year - 399) / 400
    };

    let year_of_era = adjusted_year - era * 400;
    let month_part = if m > 2 { m - 3 } else { m + 9 };
    let day_of_year = (153 * month_part + 2) / 5 + d - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

    era * 146097 + day_of_era - 719468
}

fn parse_good_friday_row(row: StringRecord) -> Option<GoodFriday> {
    let mut it = row.iter().map(str::trim);

    let year: i32 = it.next()?.parse().ok()?;
    let month: u8 = it.next()?.parse().ok()?;
    let day: u8 = it.next()?.parse().ok()?;

    if !(3..=4).contains(&month) || !(1..=31).contains(&day) {
        panic!("good_fridays.csv: {year}-{month}-{day} cannot be a Good Friday");
    }

    Some(GoodFriday {
        year,
        month,
        day,
        day_index: ymd_as_isize(year as isize, month as isize, day as isize),
    })
}

fn gen_good_friday_table<W: Write>(
    out: &mut W,
    good_fridays: &BTreeMap<i32, GoodFriday>,
) -> std::io::Result<()> {
    let mut lookup = phf_codegen::Map::<i32>::new();
    for (year, gf) in good_fridays {
        // Monday is 0 and 1970-01-01 was a Thursday, so Friday is 4.
        if (gf.day_index + 3).rem_euclid(7) != 4 {
            panic!(
                "good_fridays.csv: {}-{:02}-{:02} is not a Friday",
                gf.year, gf.month, gf.day
            );
        }
        lookup.entry(*year, format!("Date({})", gf.day_index));
    }

    let min_year = *good_fridays
        .keys()
        .next()
        .expect("no Good Friday rows in the requested year range");
    let max_year = *good_fridays
        .keys()
        .next_back()
        .expect("no Good Friday rows in the requested year range");

    if let Some(gap) = (min_year..=max_year).find(|y| !good_fridays.contains_key(y)) {
        panic!("good_fridays.csv: missing year {gap}");
    }

    writeln!(out, "pub(crate) const DATA_MIN_YEAR: isize = {min_year};")?;
    writeln!(out, "pub(crate) const DATA_MAX_YEAR: isize = {max_year};")?;
    writeln!(
        out,
        "pub(crate) static GOOD_FRIDAYS: phf::Map<i32, Date> = {};",
        lookup.build()
    )?;

    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=good_fridays.csv");
    println!("cargo:rerun-if-env-changed=HOLIDAY_PLANNER_MIN_YEAR");
    println!("cargo:rerun-if-env-changed=HOLIDAY_PLANNER_MAX_YEAR");

    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());

    let min_req_year = std::env::var("HOLIDAY_PLANNER_MIN_YEAR")
        .map(|it| it.parse().unwrap_or(DEFAULT_MIN_YEAR))
        .unwrap_or(DEFAULT_MIN_YEAR);
    let max_req_year = std::env::var("HOLIDAY_PLANNER_MAX_YEAR")
        .map(|it| it.parse().unwrap_or(DEFAULT_MAX_YEAR))
        .unwrap_or(DEFAULT_MAX_YEAR);

    let good_fridays_path = root.join("good_fridays.csv");
    let good_fridays: BTreeMap<i32, GoodFriday> = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(match File::open(&good_fridays_path) {
            Ok(it) => it,
            Err(_) => {
                panic!("missing {}", good_fridays_path.display())
            }
        }))
        .records()
        .filter_map(Result::ok)
        .filter_map(parse_good_friday_row)
        .filter(|it| (min_req_year..=max_req_year).contains(&it.year))
        .map(|it| (it.year, it))
        .collect();

    let out_dir = PathBuf::from(&std::env::var("OUT_DIR").unwrap());
    let data_out = out_dir.join("good_friday_data.rs");
    let mut data_out =
        BufWriter::new(File::create(data_out).expect("unable to create good_friday_data.rs"));
    gen_good_friday_table(&mut data_out, &good_fridays).unwrap();
}
