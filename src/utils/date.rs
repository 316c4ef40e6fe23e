use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Weekday};

/// Inclusive range of calendar days shown or exported at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidPeriod(format!(
                "end {} precedes start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn day(d: NaiveDate) -> Self {
        Self { start: d, end: d }
    }

    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        let last = month_last_day(year, month)
            .ok_or_else(|| AppError::InvalidPeriod(format!("{year}-{month:02}")))?;
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::InvalidPeriod(format!("{year}-{month:02}")))?;
        let end = NaiveDate::from_ymd_opt(year, month, last)
            .ok_or_else(|| AppError::InvalidPeriod(format!("{year}-{month:02}")))?;
        Ok(Self { start, end })
    }

    pub fn year(year: i32) -> AppResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::InvalidPeriod(year.to_string()))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::InvalidPeriod(year.to_string()))?;
        Ok(Self { start, end })
    }

    pub fn current_month() -> AppResult<Self> {
        let t = today();
        Self::month(t.year(), t.month())
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }

    /// True when `[start, end]` shares at least one day with the window.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let n = (self.end - self.start).num_days() as usize + 1;
        self.start.iter_days().take(n)
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a period expression into a window.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<DateWindow> {
    let p = p.trim();

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidPeriod(format!(
                "start and end must have same format: {p}"
            )));
        }

        let first = parse_single(start)?;
        let last = parse_single(end)?;
        return DateWindow::new(first.start, last.end);
    }

    parse_single(p)
}

fn parse_single(p: &str) -> AppResult<DateWindow> {
    let invalid = || AppError::InvalidPeriod(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            DateWindow::year(y)
        }
        // YYYY-MM
        7 => {
            let (y, m) = p.split_once('-').ok_or_else(invalid)?;
            let y: i32 = y.parse().map_err(|_| invalid())?;
            let m: u32 = m.parse().map_err(|_| invalid())?;
            DateWindow::month(y, m)
        }
        // YYYY-MM-DD
        10 => parse_date(p).map(DateWindow::day).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

/// Weekday label according to the `show_weekday` config value (None | Short | Long).
pub fn weekday_label(d: NaiveDate, mode: &str) -> String {
    let wd = d.weekday();
    match mode.to_lowercase().as_str() {
        "short" => short_weekday(wd).to_string(),
        "long" => long_weekday(wd).to_string(),
        _ => String::new(),
    }
}

fn short_weekday(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

fn long_weekday(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match input {
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(None),
    }
}
