//! Calendar-month windows for the run driver.
//!
//! The expansion engine takes any caller-supplied window; this helper
//! builds the one the driver uses, covering a single UTC calendar month.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use rota_core::error::{CoreError, CoreResult};

/// ## Summary
/// Returns the inclusive UTC window for one calendar month: the first
/// day's midnight through the last day's final representable millisecond.
///
/// ## Errors
/// Fails if `month` is outside 1..=12 or `year` is outside chrono's
/// calendar range.
pub fn month_window(year: i32, month: u32) -> CoreResult<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CoreError::ValidationError(format!("{year}-{month} is not a valid calendar month"))
    })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| {
        CoreError::ValidationError(format!("{year}-{month} has no following month"))
    })?;
    let last = next_first - Days::new(1);

    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or(CoreError::InvariantViolation("end-of-day must be a valid time"))?;

    Ok((
        DateTime::from_naive_utc_and_offset(first.and_time(NaiveTime::MIN), Utc),
        DateTime::from_naive_utc_and_offset(last.and_time(end_of_day), Utc),
    ))
}
