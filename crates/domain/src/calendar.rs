// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business-day arithmetic.
//!
//! A business day is Monday through Friday, minus any configured holiday.
//! The default calendar has no holidays. School activity suspensions do not
//! change what a business day is; they are counted separately and extend
//! notice windows (see [`check_minimum_notice`](crate::check_minimum_notice)).

use crate::error::DomainError;
use std::collections::BTreeSet;
use time::{Date, Weekday};

/// Holidays and suspension days used by temporal guards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessCalendar {
    holidays: BTreeSet<Date>,
    suspensions: BTreeSet<Date>,
}

fn next_day(date: Date) -> Result<Date, DomainError> {
    date.next_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("day after {date}"),
        })
}

fn previous_day(date: Date) -> Result<Date, DomainError> {
    date.previous_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("day before {date}"),
        })
}

impl BusinessCalendar {
    /// Creates a calendar with no holidays and no suspensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = Date>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    #[must_use]
    pub fn with_suspensions(mut self, suspensions: impl IntoIterator<Item = Date>) -> Self {
        self.suspensions.extend(suspensions);
        self
    }

    #[must_use]
    pub const fn holidays(&self) -> &BTreeSet<Date> {
        &self.holidays
    }

    #[must_use]
    pub const fn suspensions(&self) -> &BTreeSet<Date> {
        &self.suspensions
    }

    /// Returns true for weekdays that are not holidays.
    #[must_use]
    pub fn is_business_day(&self, date: Date) -> bool {
        !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
            && !self.holidays.contains(&date)
    }

    /// Returns the `days`-th business day after `date`.
    ///
    /// `date` itself is never counted. Adding zero days returns `date`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` past the end of the
    /// supported date range.
    pub fn add_business_days(&self, date: Date, days: u32) -> Result<Date, DomainError> {
        let mut current: Date = date;
        let mut remaining: u32 = days;
        while remaining > 0 {
            current = next_day(current)?;
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }

    /// Counts business days strictly between `start` and `end`.
    ///
    /// Returns zero when `end` is not after `start`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` past the end of the
    /// supported date range.
    pub fn business_days_between(&self, start: Date, end: Date) -> Result<u32, DomainError> {
        let mut count: u32 = 0;
        let mut current: Date = start;
        loop {
            current = next_day(current)?;
            if current >= end {
                return Ok(count);
            }
            if self.is_business_day(current) {
                count += 1;
            }
        }
    }

    /// Steps back from `date` until a business day is found.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` before the start of the
    /// supported date range.
    pub fn last_business_day_on_or_before(&self, date: Date) -> Result<Date, DomainError> {
        let mut current: Date = date;
        while !self.is_business_day(current) {
            current = previous_day(current)?;
        }
        Ok(current)
    }

    /// Counts suspension days in `start..=end`.
    #[must_use]
    pub fn suspension_days_between(&self, start: Date, end: Date) -> u32 {
        if end < start {
            return 0;
        }
        let count: usize = self.suspensions.range(start..=end).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Adds `days` business days to `today`, extended by the suspension days
    /// that fall inside the unextended window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` past the end of the
    /// supported date range.
    pub fn add_business_days_with_suspensions(
        &self,
        today: Date,
        days: u32,
    ) -> Result<Date, DomainError> {
        let window_end: Date = self.add_business_days(today, days)?;
        let suspended: u32 = self.suspension_days_between(today, window_end);
        self.add_business_days(today, days.saturating_add(suspended))
    }
}
