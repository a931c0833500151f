// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::error::EngineError;

/// A calendar month (year + month). The engine's unit of time: schedules,
/// budgets and obligations are all month-granular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32, // 1..=12
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(d: NaiveDate) -> Self {
        Self {
            year: d.year(),
            month: d.month(),
        }
    }

    /// Parse a `YYYY-MM` string.
    pub fn from_ym_str(s: &str) -> Option<Self> {
        let (y, m) = s.split_once('-')?;
        if y.len() != 4 || m.len() != 2 {
            return None;
        }
        Self::new(y.parse().ok()?, m.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn index(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// The month `months` steps away (negative steps go back).
    pub fn offset(self, months: i64) -> Self {
        let idx = self.index() + months;
        Self {
            year: idx.div_euclid(12) as i32,
            month: (idx.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn succ(self) -> Self {
        self.offset(1)
    }

    pub fn first_day(self) -> NaiveDate {
        self.day_clamped(1)
    }

    fn last_day_number(self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// The given day-of-month, clamped to the month's length.
    pub fn day_clamped(self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.last_day_number());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_default()
    }

    /// Short chart label, e.g. "Aug 2026".
    pub fn label(self) -> String {
        self.first_day().format("%b %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Month::from_ym_str(&s)
            .ok_or_else(|| D::Error::custom(format!("invalid month '{}', expected YYYY-MM", s)))
    }
}

/// Whole calendar months from `a` to `b`. Fails when `b` is before `a`.
pub fn months_between(a: Month, b: Month) -> Result<u32, EngineError> {
    if b < a {
        return Err(EngineError::InvalidRange { start: a, end: b });
    }
    Ok((b.index() - a.index()) as u32)
}

/// Signed month gap from `a` to `b`, negative when `b` is earlier.
pub fn month_gap(a: Month, b: Month) -> i64 {
    b.index() - a.index()
}

/// True iff `period` falls in `[start, end]`; a missing `end` means
/// unbounded future.
pub fn is_within(period: Month, start: Month, end: Option<Month>) -> bool {
    period >= start && end.is_none_or(|e| period <= e)
}

/// A run of consecutive months, `len` long, starting at `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub first: Month,
    pub len: u32,
}

impl MonthWindow {
    pub fn new(first: Month, len: u32) -> Self {
        Self { first, len }
    }

    pub fn iter(self) -> impl Iterator<Item = Month> {
        (0..self.len as i64).map(move |i| self.first.offset(i))
    }

    pub fn last(self) -> Month {
        self.first.offset(self.len.saturating_sub(1) as i64)
    }
}
