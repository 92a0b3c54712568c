//! Reference dates. Day 0 is Monday 2025-12-08.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Date `offset` days after the reference Monday.
pub fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 8).expect("valid reference date")
        + Duration::days(i64::from(offset))
}

/// `hour`:00 on day `offset`.
pub fn at(offset: u32, hour: u32) -> NaiveDateTime {
    day(offset)
        .and_hms_opt(hour, 0, 0)
        .expect("hour must be below 24")
}
