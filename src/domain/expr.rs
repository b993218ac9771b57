//! Datetime-expression parsing for [`PortaMoment::new`].
//!
//! The grammar is the closed set of expressions billing code actually
//! sends: `now` (or empty), the two wire formats, `today`/`tomorrow`/
//! `yesterday` with an optional `noon` or `midnight`, and the two
//! month-boundary phrases. Everything is interpreted as wall time in the
//! target zone, relative calculations against the supplied clock.
//!
//! [`PortaMoment::new`]: crate::domain::moment::PortaMoment::new

use crate::domain::calendar;
use crate::domain::moment::PortaMoment;
use crate::domain::ports::Clock;
use crate::domain::timezone::Zone;
use crate::utils::error::{MomentError, Result};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub(crate) fn parse(expr: &str, zone: Zone, clock: &dyn Clock) -> Result<DateTime<Utc>> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Ok(clock.now());
    }
    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "now" => return Ok(clock.now()),
        // Both phrases keep the current time-of-day, only the date moves.
        "first day of next month" => {
            let local = zone.naive_local(clock.now());
            let date = calendar::first_of_next_month(local.date());
            return Ok(zone.instant_of_local(date.and_time(local.time())));
        }
        "last day of this month" => {
            let local = zone.naive_local(clock.now());
            let date = calendar::last_of_month(local.date());
            return Ok(zone.instant_of_local(date.and_time(local.time())));
        }
        _ => {}
    }
    if let Some(instant) = day_keyword(&lower, zone, clock) {
        return Ok(instant);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, PortaMoment::WIRE_DATETIME_FORMAT) {
        return Ok(zone.instant_of_local(naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, PortaMoment::WIRE_DATE_FORMAT) {
        return Ok(zone.instant_of_local(date.and_time(NaiveTime::MIN)));
    }
    Err(MomentError::Parse {
        message: format!("unsupported datetime expression '{trimmed}'"),
    })
}

fn day_keyword(lower: &str, zone: Zone, clock: &dyn Clock) -> Option<DateTime<Utc>> {
    let mut words = lower.split_whitespace();
    let day_shift = match words.next()? {
        "today" => 0i64,
        "tomorrow" => 1,
        "yesterday" => -1,
        _ => return None,
    };
    let time = match words.next() {
        None | Some("midnight") => NaiveTime::MIN,
        Some("noon") => NaiveTime::from_hms_opt(12, 0, 0)?,
        Some(_) => return None,
    };
    if words.next().is_some() {
        return None;
    }
    let today = zone.naive_local(clock.now()).date();
    let date = if day_shift >= 0 {
        today.checked_add_days(Days::new(day_shift as u64))?
    } else {
        today.checked_sub_days(Days::new(day_shift.unsigned_abs()))?
    };
    Some(zone.instant_of_local(date.and_time(time)))
}
