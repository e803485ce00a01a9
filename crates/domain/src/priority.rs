// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Urgency classification of a request relative to its event date.

use crate::calendar::BusinessCalendar;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// Requests due within this many business days are priority.
pub const PRIORITARIO: u32 = 2;
/// Lower bound of the limit band, in business days.
pub const LIMITE_INFERIOR: u32 = 3;
/// Upper bound of the limit band, in business days.
pub const LIMITE_SUPERIOR: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Prioritario,
    Limite,
    Regular,
    Vencido,
}

impl Priority {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prioritario => "PRIORITARIO",
            Self::Limite => "LIMITE",
            Self::Regular => "REGULAR",
            Self::Vencido => "VENCIDO",
        }
    }

    /// Requests in these bands were filed too close to the event and need a
    /// challenge round before CODAE may authorize them.
    #[must_use]
    pub const fn is_late(&self) -> bool {
        matches!(self, Self::Prioritario | Self::Limite)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies how close `event_date` is to `today`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if date arithmetic leaves
/// the supported range.
pub fn classify_priority(
    today: Date,
    event_date: Date,
    calendar: &BusinessCalendar,
) -> Result<Priority, DomainError> {
    let last_business_day: Date = calendar.last_business_day_on_or_before(event_date)?;
    let minimum: Date = calendar.add_business_days_with_suspensions(today, PRIORITARIO)?;
    let lower: Date = calendar.add_business_days_with_suspensions(today, LIMITE_INFERIOR)?;
    let upper: Date = calendar.add_business_days_with_suspensions(today, LIMITE_SUPERIOR)?;

    let priority: Priority = if minimum >= last_business_day && last_business_day >= today {
        Priority::Prioritario
    } else if upper >= event_date && event_date >= lower {
        Priority::Limite
    } else if last_business_day >= upper {
        Priority::Regular
    } else {
        Priority::Vencido
    };
    Ok(priority)
}
