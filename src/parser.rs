use chrono::{NaiveDate, NaiveDateTime};

use crate::date::Date;

/// Failure to turn text into a pair of dates.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("range separators must be a non-empty list of non-empty strings")]
    InvalidSeparators,
    #[error("input \"{input}\" does not contain exactly two dates")]
    SegmentCount { input: String },
    #[error("\"{segment}\" cannot be parsed as a date")]
    InvalidDate { segment: String },
}

/// Date notations accepted when no exact format is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateLocale {
    /// `1.6.2023`, optionally followed by a time of day.
    #[default]
    Finnish,
    /// `2023-06-01`, optionally followed by a time of day.
    Iso,
}

impl DateLocale {
    const fn formats(&self) -> &'static [&'static str] {
        match self {
            DateLocale::Finnish => &[
                "%d.%m.%Y",
                "%d.%m.%Y %H:%M:%S",
                "%d.%m.%Y %H.%M.%S",
                "%d.%m.%Y %H:%M",
                "%d.%m.%Y %H.%M",
            ],
            DateLocale::Iso => &[
                "%Y-%m-%d",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M",
            ],
        }
    }

    /// Range separators that never occur inside a date of this locale.
    pub const fn separators(&self) -> &'static [&'static str] {
        match self {
            DateLocale::Finnish => &["-"],
            DateLocale::Iso => &["/", " - ", " to "],
        }
    }
}

/// Splits text such as `1.6.2023 - 14.6.2023` into its two dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeParser {
    separators: Vec<String>,
    format: Option<String>,
    locale: DateLocale,
}

impl Default for DateRangeParser {
    /// Finnish dates separated by `-`.
    fn default() -> Self {
        Self::for_locale(DateLocale::Finnish)
    }
}

impl DateRangeParser {
    /// Parser for `locale` dates split on the locale's own separators.
    pub fn for_locale(locale: DateLocale) -> Self {
        DateRangeParser {
            separators: locale.separators().iter().map(|it| it.to_string()).collect(),
            format: None,
            locale,
        }
    }

    pub fn new<I, S>(separators: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let separators: Vec<String> = separators.into_iter().map(Into::into).collect();
        if separators.is_empty() || separators.iter().any(String::is_empty) {
            return Err(FormatError::InvalidSeparators);
        }

        Ok(DateRangeParser {
            separators,
            format: None,
            locale: DateLocale::default(),
        })
    }

    /// Parses every date with exactly this `chrono` format string.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    #[inline]
    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    #[inline]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    #[inline]
    pub fn locale(&self) -> DateLocale {
        self.locale
    }

    /// Parses `input` into its start and end date. Time of day is dropped.
    pub fn parse(&self, input: &str) -> Result<(Date, Date), FormatError> {
        let segments = self.split(input);
        let [first, second] = segments.as_slice() else {
            return Err(FormatError::SegmentCount {
                input: input.to_string(),
            });
        };

        Ok((self.parse_date(first)?, self.parse_date(second)?))
    }

    /// Splits on whichever separator matches first, trimming and dropping
    /// empty segments.
    fn split<'a>(&self, input: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut segment_start = 0;
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            match self.separators.iter().find(|sep| rest.starts_with(sep.as_str())) {
                Some(sep) => {
                    segments.push(&input[segment_start..pos]);
                    pos += sep.len();
                    segment_start = pos;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        segments.push(&input[segment_start..]);

        segments
            .into_iter()
            .map(str::trim)
            .filter(|it| !it.is_empty())
            .collect()
    }

    fn parse_date(&self, segment: &str) -> Result<Date, FormatError> {
        let exact;
        let formats: &[&str] = match &self.format {
            Some(format) => {
                exact = [format.as_str()];
                &exact
            }
            None => self.locale.formats(),
        };

        formats
            .iter()
            .find_map(|format| parse_with(segment, format))
            .ok_or_else(|| FormatError::InvalidDate {
                segment: segment.to_string(),
            })
    }
}

fn parse_with(segment: &str, format: &str) -> Option<Date> {
    NaiveDateTime::parse_from_str(segment, format)
        .map(Date::from)
        .or_else(|_| NaiveDate::parse_from_str(segment, format).map(Date::from))
        .ok()
}
