//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Inclusive calendar-day windows for synthesis requests."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimError};

const ISO_DATE: &str = "%Y-%m-%d";

/// Optional bounds as they arrive from the dashboard, ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

impl RangeQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// Inclusive window of calendar days, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(SimError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    /// Resolve a query against `today`.
    ///
    /// A missing `to` becomes `today`; a missing `from` becomes the first day of a
    /// `window_days` wide window ending on the resolved `to`.
    pub fn resolve(query: &RangeQuery, today: NaiveDate, window_days: u32) -> Result<Self> {
        let to = match query.to.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => today,
        };
        let from = match query.from.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => trailing_start(to, window_days),
        };
        Self::new(from, to)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of days covered, never zero.
    pub fn len(&self) -> usize {
        (self.to - self.from).num_days() as usize + 1
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |day| *day <= to)
    }
}

fn trailing_start(end: NaiveDate, window_days: u32) -> NaiveDate {
    let back = u64::from(window_days.max(1) - 1);
    end.checked_sub_days(Days::new(back))
        .unwrap_or(NaiveDate::MIN)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE).map_err(|source| SimError::InvalidDate {
        value: raw.to_owned(),
        source,
    })
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}
