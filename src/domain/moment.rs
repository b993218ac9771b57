use crate::domain::calendar;
use crate::domain::expr;
use crate::domain::ports::{Clock, SystemClock};
use crate::domain::timezone::{TimezoneSpec, Zone};
use crate::utils::error::{MomentError, Result};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Immutable point in time bound to a timezone.
///
/// The billing API always exchanges datetime strings in UTC while business
/// logic reasons in a local zone, so a moment carries the absolute instant
/// plus the zone used for local projection and calendar arithmetic. Every
/// transform returns a new value; the receiver is never touched.
///
/// Equality and ordering compare the absolute instant only, regardless of
/// the zones involved.
#[derive(Debug, Clone, Copy)]
pub struct PortaMoment {
    instant: DateTime<Utc>,
    zone: Zone,
}

impl PortaMoment {
    /// Wire datetime format, always UTC on the wire.
    pub const WIRE_DATETIME_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Wire date-only format, contextually local.
    pub const WIRE_DATE_FORMAT: &'static str = "%Y-%m-%d";

    /// Build a moment by interpreting `expr` as local wall time in the
    /// resolved timezone. See the crate docs for the accepted expression
    /// forms ("now", the wire formats and a few relative phrases).
    pub fn new<'a>(expr: &str, timezone: impl Into<TimezoneSpec<'a>>) -> Result<Self> {
        Self::new_with_clock(expr, timezone, &SystemClock)
    }

    /// Same as [`new`](Self::new) with an explicit clock for the relative
    /// expressions.
    pub fn new_with_clock<'a>(
        expr: &str,
        timezone: impl Into<TimezoneSpec<'a>>,
        clock: &dyn Clock,
    ) -> Result<Self> {
        let zone = timezone.into().resolve()?;
        let instant = expr::parse(expr, zone, clock)?;
        Ok(Self { instant, zone })
    }

    /// Build from a wire datetime string as the billing returns it. The
    /// string is strictly UTC; the resolved timezone only changes the local
    /// projection, never the instant.
    pub fn from_wire_string<'a>(
        datetime: &str,
        timezone: impl Into<TimezoneSpec<'a>>,
    ) -> Result<Self> {
        let zone = timezone.into().resolve()?;
        let naive = NaiveDateTime::parse_from_str(datetime.trim(), Self::WIRE_DATETIME_FORMAT)
            .map_err(|e| MomentError::Parse {
                message: format!("'{datetime}' is not a YYYY-MM-DD HH:MM:SS wire datetime: {e}"),
            })?;
        Ok(Self {
            instant: Utc.from_utc_datetime(&naive),
            zone,
        })
    }

    /// Build from a wire date-only string. Unlike the full datetime form, a
    /// bare date from the billing is contextually local, so it denotes
    /// midnight in the resolved timezone itself.
    pub fn from_wire_date_string<'a>(
        date: &str,
        timezone: impl Into<TimezoneSpec<'a>>,
    ) -> Result<Self> {
        let zone = timezone.into().resolve()?;
        let parsed = chrono::NaiveDate::parse_from_str(date.trim(), Self::WIRE_DATE_FORMAT)
            .map_err(|e| MomentError::Parse {
                message: format!("'{date}' is not a YYYY-MM-DD wire date: {e}"),
            })?;
        Ok(Self {
            instant: zone.instant_of_local(parsed.and_time(NaiveTime::MIN)),
            zone,
        })
    }

    /// Copy the instant of any chrono datetime, bound to that instant's
    /// fixed UTC offset. The `From` impls for `DateTime<Utc>`,
    /// `DateTime<FixedOffset>` and `DateTime<Tz>` keep the zone verbatim.
    pub fn from_instant<T: TimeZone>(other: &DateTime<T>) -> Self {
        let fixed = other.clone().fixed_offset();
        Self {
            instant: fixed.with_timezone(&Utc),
            zone: Zone::Fixed(*fixed.offset()),
        }
    }

    /// Wire datetime string for any chrono datetime, without going through
    /// a named moment.
    pub fn format_instant<T: TimeZone>(other: &DateTime<T>) -> String {
        other
            .with_timezone(&Utc)
            .format(Self::WIRE_DATETIME_FORMAT)
            .to_string()
    }

    /// Project to UTC and format as the wire datetime string. Also the
    /// `Display` and `Serialize` form.
    pub fn to_wire_string(&self) -> String {
        self.to_string()
    }

    /// Local formatting with an arbitrary chrono pattern.
    pub fn format_local(&self, fmt: &str) -> String {
        match self.zone {
            Zone::Named(tz) => self.instant.with_timezone(&tz).format(fmt).to_string(),
            Zone::Fixed(offset) => self.instant.with_timezone(&offset).format(fmt).to_string(),
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Local wall-clock view in the bound zone.
    pub fn local_datetime(&self) -> NaiveDateTime {
        self.zone.naive_local(self.instant)
    }

    /// 00:00:00 local, same calendar day, same zone.
    pub fn first_moment_of_day(&self) -> Self {
        self.with_local(self.local_datetime().date().and_time(NaiveTime::MIN))
    }

    /// 23:59:59 local, same calendar day, same zone.
    ///
    /// One second before midnight is the billing convention for "end of
    /// day", baked into the one-second wire granularity. It is not the true
    /// last instant of the day and must stay exactly this.
    pub fn last_moment_of_day(&self) -> Self {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).expect("valid wall time");
        self.with_local(self.local_datetime().date().and_time(last_second))
    }

    /// One calendar day later, wall clock preserved. Crosses month and year
    /// boundaries and DST transitions like calendar arithmetic, not like a
    /// flat +86400s.
    pub fn next_day(&self) -> Self {
        let local = self.local_datetime();
        self.with_local(
            local
                .checked_add_days(Days::new(1))
                .expect("within calendar range"),
        )
    }

    /// First calendar day of the following month, time-of-day preserved.
    pub fn first_day_of_next_month(&self) -> Self {
        let local = self.local_datetime();
        let date = calendar::first_of_next_month(local.date());
        self.with_local(date.and_time(local.time()))
    }

    /// Last calendar day of the current month, time-of-day preserved.
    pub fn last_day_of_this_month(&self) -> Self {
        let local = self.local_datetime();
        let date = calendar::last_of_month(local.date());
        self.with_local(date.and_time(local.time()))
    }

    /// Prorate a monthly fee from this day (inclusive) till the end of the
    /// month: `round(D - d + 1) * fee / D` for a `D`-day month and
    /// day-of-month `d`.
    pub fn prorate_till_end_of_month(&self, fee: f64) -> f64 {
        let date = self.local_datetime().date();
        let days = calendar::days_in_month(date);
        let billable = f64::from(days - date.day() + 1).round();
        billable * fee / f64::from(days)
    }

    /// Strictly later than the wall clock at call time.
    pub fn is_in_future(&self) -> bool {
        self.is_in_future_with(&SystemClock)
    }

    pub fn is_in_future_with(&self, clock: &dyn Clock) -> bool {
        self.instant > clock.now()
    }

    /// Strictly earlier than the wall clock at call time.
    pub fn is_in_past(&self) -> bool {
        self.is_in_past_with(&SystemClock)
    }

    pub fn is_in_past_with(&self, clock: &dyn Clock) -> bool {
        self.instant < clock.now()
    }

    /// Inclusive range check; an absent bound is unbounded on that side.
    /// Swapped bounds are not an error, they just never match.
    pub fn is_between(&self, from: Option<&Self>, to: Option<&Self>) -> bool {
        from.map_or(true, |f| self.instant >= f.instant)
            && to.map_or(true, |t| self.instant <= t.instant)
    }

    fn with_local(&self, local: NaiveDateTime) -> Self {
        Self {
            instant: self.zone.instant_of_local(local),
            zone: self.zone,
        }
    }
}

impl fmt::Display for PortaMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format(Self::WIRE_DATETIME_FORMAT))
    }
}

impl From<DateTime<Utc>> for PortaMoment {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            instant: dt,
            zone: Zone::UTC,
        }
    }
}

impl From<DateTime<FixedOffset>> for PortaMoment {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self {
            instant: dt.with_timezone(&Utc),
            zone: Zone::Fixed(dt.timezone()),
        }
    }
}

impl From<DateTime<Tz>> for PortaMoment {
    fn from(dt: DateTime<Tz>) -> Self {
        Self {
            instant: dt.with_timezone(&Utc),
            zone: Zone::Named(dt.timezone()),
        }
    }
}

impl PartialEq for PortaMoment {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for PortaMoment {}

impl PartialOrd for PortaMoment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PortaMoment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl Serialize for PortaMoment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PortaMoment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_wire_string(&s, "UTC").map_err(serde::de::Error::custom)
    }
}
