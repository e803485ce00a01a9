// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BusinessCalendar, Priority, classify_priority};
use time::Date;
use time::macros::date;

// Monday
const TODAY: Date = date!(2022 - 01 - 24);

fn classify(event: Date) -> Priority {
    classify_priority(TODAY, event, &BusinessCalendar::new()).unwrap()
}

#[test]
fn test_within_two_business_days_is_priority() {
    assert_eq!(classify(date!(2022 - 01 - 24)), Priority::Prioritario);
    assert_eq!(classify(date!(2022 - 01 - 26)), Priority::Prioritario);
}

#[test]
fn test_three_to_five_business_days_is_limit() {
    assert_eq!(classify(date!(2022 - 01 - 27)), Priority::Limite);
    assert_eq!(classify(date!(2022 - 01 - 29)), Priority::Limite);
    assert_eq!(classify(date!(2022 - 01 - 31)), Priority::Limite);
}

#[test]
fn test_beyond_five_business_days_is_regular() {
    assert_eq!(classify(date!(2022 - 02 - 01)), Priority::Regular);
    assert_eq!(classify(date!(2022 - 03 - 15)), Priority::Regular);
}

#[test]
fn test_past_event_is_expired() {
    assert_eq!(classify(date!(2022 - 01 - 21)), Priority::Vencido);
}

#[test]
fn test_late_bands() {
    assert!(Priority::Prioritario.is_late());
    assert!(Priority::Limite.is_late());
    assert!(!Priority::Regular.is_late());
    assert!(!Priority::Vencido.is_late());
}
