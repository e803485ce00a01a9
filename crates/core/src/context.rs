// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sigpae_domain::BusinessCalendar;
use time::{Date, OffsetDateTime};

/// Clock and calendar a command is evaluated against.
///
/// The engine never reads the wall clock; callers decide what "now" is.
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    /// Timestamp recorded on log entries.
    pub now: OffsetDateTime,
    /// The local date used by temporal guards.
    pub today: Date,
    pub calendar: &'a BusinessCalendar,
}

impl<'a> TransitionContext<'a> {
    #[must_use]
    pub const fn new(now: OffsetDateTime, today: Date, calendar: &'a BusinessCalendar) -> Self {
        Self {
            now,
            today,
            calendar,
        }
    }
}
