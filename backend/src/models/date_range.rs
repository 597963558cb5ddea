use chrono::{Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DateRangeError {
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Unparseable(String),
}

/// Inclusive calendar date range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| DateRangeError::Unparseable(raw.to_string()))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every calendar day in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..self.len_days() as u64).filter_map(move |offset| start.checked_add_days(Days::new(offset)))
    }
}
