use serde::Serializer;
use time::{macros::format_description, util::is_leap_year, Date, Month};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{input} is not a valid date in yyyy-mm-dd format")]
pub struct DateError {
    pub input: String,
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// Anything other than four year digits, two month digits and two day digits
/// separated by `-` is rejected, as is a date that does not exist on the
/// calendar (`2017-02-30`).
pub fn parse_date(text: &str) -> Result<Date, DateError> {
    let err = || DateError {
        input: text.to_owned(),
    };

    let bytes = text.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(err());
    }

    Date::parse(text, format_description!("[year]-[month]-[day]")).map_err(|_| err())
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Serializes a date as `YYYY-MM-DD`.
pub fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

/// An inclusive date window, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: Date,
    end: Date,
}

impl DateWindow {
    /// Returns `None` when `start` falls after `end`.
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Range used for temperature aggregation. `end = None` means the range is
/// open towards the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn from_start(start: Date) -> Self {
        Self { start, end: None }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

impl From<DateWindow> for DateRange {
    fn from(window: DateWindow) -> Self {
        Self::between(window.start, window.end)
    }
}

/// The trailing twelve months ending at `reference`, inclusive on both ends.
///
/// The start keeps the reference month and day one year back. A Feb 29
/// reference lands on Feb 28 of the previous (non-leap) year.
pub fn last_year_window(reference: Date) -> DateWindow {
    let year = reference.year() - 1;
    let month = reference.month();
    let day = match (month, reference.day()) {
        (Month::February, 29) if !is_leap_year(year) => 28,
        (_, day) => day,
    };

    let start = Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN);

    DateWindow {
        start,
        end: reference,
    }
}
