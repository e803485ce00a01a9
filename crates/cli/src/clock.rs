// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall clock in the school network's timezone.
//!
//! Business dates are decided in America/Sao_Paulo regardless of where the
//! binary runs. This is the only place the engine's clock is read.

use chrono::{DateTime, Datelike, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;
use time::{Date, Month, OffsetDateTime, UtcOffset};

/// The instant and business date handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub now: OffsetDateTime,
    pub today: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockError(pub String);

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Clock error: {}", self.0)
    }
}

impl std::error::Error for ClockError {}

impl Clock {
    /// Reads the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the local time cannot be represented.
    pub fn now() -> Result<Self, ClockError> {
        Self::at(Utc::now())
    }

    /// The clock at a given UTC instant.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be represented.
    pub fn at(instant: DateTime<Utc>) -> Result<Self, ClockError> {
        let local: DateTime<Tz> = instant.with_timezone(&Sao_Paulo);
        let offset: UtcOffset = to_time_offset(local.offset().fix().local_minus_utc())?;
        let now: OffsetDateTime = OffsetDateTime::from_unix_timestamp(local.timestamp())
            .map_err(|e| ClockError(e.to_string()))?
            .to_offset(offset);

        Ok(Self {
            now,
            today: to_time_date(local.date_naive())?,
        })
    }

    /// A clock pinned to the start of `today`, for replaying a given day.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be represented.
    pub fn pinned(today: Date) -> Result<Self, ClockError> {
        let naive: NaiveDate = NaiveDate::from_ymd_opt(
            today.year(),
            u32::from(u8::from(today.month())),
            u32::from(today.day()),
        )
        .ok_or_else(|| ClockError(format!("Invalid date: {today}")))?;
        let offset: UtcOffset = to_time_offset(
            Sao_Paulo
                .offset_from_utc_date(&naive)
                .fix()
                .local_minus_utc(),
        )?;

        Ok(Self {
            now: today.midnight().assume_offset(offset),
            today,
        })
    }
}

fn to_time_offset(seconds: i32) -> Result<UtcOffset, ClockError> {
    UtcOffset::from_whole_seconds(seconds).map_err(|e| ClockError(e.to_string()))
}

fn to_time_date(date: NaiveDate) -> Result<Date, ClockError> {
    let month: u8 = u8::try_from(date.month()).map_err(|e| ClockError(e.to_string()))?;
    let day: u8 = u8::try_from(date.day()).map_err(|e| ClockError(e.to_string()))?;
    Date::from_calendar_date(
        date.year(),
        Month::try_from(month).map_err(|e| ClockError(e.to_string()))?,
        day,
    )
    .map_err(|e| ClockError(e.to_string()))
}
