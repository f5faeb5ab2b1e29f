use std::process::ExitCode;

use clap::Parser;
use holiday_planner::parser::{DateLocale, DateRangeParser, FormatError};
use holiday_planner::{Error, HolidayPlanner};
use tracing_subscriber::EnvFilter;

/// Calculates how many vacation days a leave period consumes.
#[derive(Debug, Parser)]
#[command(name = "vacation-days", version, about)]
struct Cli {
    /// Separator between the start and end date. May be given more than once.
    /// Defaults to "-", or to "/", " - " and " to " with --iso.
    #[arg(short, long = "separator", env = "VACATION_SEPARATOR")]
    separators: Vec<String>,

    /// Exact chrono format of both dates, e.g. "%d.%m.%Y".
    #[arg(short, long, env = "VACATION_DATE_FORMAT")]
    format: Option<String>,

    /// Read dates as 2023-06-01 instead of 1.6.2023. Quote the range or use "/"
    /// between the dates, since joined arguments lose their spaces.
    #[arg(long)]
    iso: bool,

    /// Date range such as "1.6.2023 - 14.6.2023". Arguments are joined without
    /// spaces before parsing.
    #[arg(required = true, allow_hyphen_values = true)]
    range: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Planner(#[from] Error),
}

impl CliError {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Planner(Error::YearNotAvailable(_)) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let locale = if cli.iso {
        DateLocale::Iso
    } else {
        DateLocale::Finnish
    };
    let mut parser = if cli.separators.is_empty() {
        DateRangeParser::for_locale(locale)
    } else {
        DateRangeParser::new(cli.separators)?.with_locale(locale)
    };
    if let Some(format) = cli.format {
        parser = parser.with_format(format);
    }

    let input = cli.range.concat();
    let planner = HolidayPlanner::new().with_parser(parser);
    let days = planner.spent_days_in(&input)?;

    println!("Spending vacation during period {input} consumes {days} vacation days");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn arguments_are_joined() {
        let cli = Cli::try_parse_from(["vacation-days", "13.2.2023", "-", "20.2.2023"]).unwrap();
        assert_eq!(cli.range.concat(), "13.2.2023-20.2.2023");
        assert!(cli.separators.is_empty());
        assert!(run(cli).is_ok());
    }

    #[test]
    fn exit_codes() {
        let cli = Cli::try_parse_from(["vacation-days", "1.6.2200-2.6.2200"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let cli = Cli::try_parse_from(["vacation-days", "1.6.2023"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let args = ["vacation-days", "-s", "|", "-s", " to ", "1.6.2023 to 2.6.2023"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.separators, ["|", " to "]);
        assert!(run(cli).is_ok());
    }

    #[test]
    fn iso_dates_with_default_separators() {
        for range in ["2023-02-13 - 2023-02-20", "2023-02-13/2023-02-20"] {
            let cli = Cli::try_parse_from(["vacation-days", "--iso", range]).unwrap();
            assert!(run(cli).is_ok(), "{range}");
        }

        let cli = Cli::try_parse_from(["vacation-days", "--iso", "2023-02-13", "/", "2023-02-20"])
            .unwrap();
        assert!(run(cli).is_ok());

        // An explicit separator replaces the defaults.
        let args = ["vacation-days", "--iso", "-s", "|", "2023-02-13 - 2023-02-20"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(run(cli).is_err());
    }
}
