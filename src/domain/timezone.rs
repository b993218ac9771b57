use crate::domain::ports::SettingsProvider;
use crate::utils::error::{MomentError, Result};
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Settings key queried when a provider is given as the timezone argument.
pub const DEFAULT_TIMEZONE_KEY: &str = "default.timezone";

/// Concrete timezone a moment is bound to: an IANA zone or a fixed
/// UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Zone {
    pub const UTC: Zone = Zone::Named(Tz::UTC);

    /// Local wall-clock projection of an instant.
    pub(crate) fn naive_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Named(tz) => instant.with_timezone(tz).naive_local(),
            Zone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Instant a local wall time denotes in this zone.
    ///
    /// Ambiguous wall times (DST fall-back) map to the earlier offset.
    /// Non-existent wall times (DST spring-forward gap) are interpreted
    /// with the offset in effect just before the transition, so the wall
    /// time normalizes forward by the gap width: Paris 02:30 on a
    /// one-hour spring-forward day means 03:30 local.
    pub(crate) fn instant_of_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.map_local(local) {
            LocalResult::Single(instant) => instant,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                let mut probe = local;
                for _ in 0..12 {
                    probe -= Duration::minutes(15);
                    if let LocalResult::Single(instant) = self.map_local(probe) {
                        return instant + (local - probe);
                    }
                }
                // No real zone has a gap this wide; read the wall time as UTC.
                Utc.from_utc_datetime(&local)
            }
        }
    }

    fn map_local(&self, local: NaiveDateTime) -> LocalResult<DateTime<Utc>> {
        match self {
            Zone::Named(tz) => tz
                .from_local_datetime(&local)
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(&local)
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::UTC
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for Zone {
    type Err = MomentError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(tz) = trimmed.parse::<Tz>() {
            return Ok(Zone::Named(tz));
        }
        if let Some(offset) = parse_fixed_offset(trimmed) {
            return Ok(Zone::Fixed(offset));
        }
        Err(MomentError::InvalidTimezone {
            message: format!("'{trimmed}' is not an IANA zone name or a UTC offset"),
        })
    }
}

/// Fixed-offset expressions: `+03:00`, `-0530`, `+9`, optionally prefixed
/// with `UTC` or `GMT`.
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let rest = s
        .strip_prefix("UTC")
        .or_else(|| s.strip_prefix("GMT"))
        .unwrap_or(s);
    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1i32, &rest[1..]),
        b'-' => (-1i32, &rest[1..]),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        1 | 2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        5 if digits.as_bytes()[2] == b':' => (digits[..2].parse().ok()?, digits[3..].parse().ok()?),
        _ => return None,
    };
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Timezone value a settings provider may hand back: a name still to be
/// parsed, or an already-resolved zone. Never another provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimezoneSetting {
    Name(String),
    Zone(Zone),
}

/// Polymorphic timezone argument accepted by every constructor, resolved
/// once into a [`Zone`] before the moment is built.
#[derive(Clone, Copy)]
pub enum TimezoneSpec<'a> {
    Name(&'a str),
    Zone(Zone),
    Provider {
        settings: &'a dyn SettingsProvider,
        key: &'a str,
    },
}

impl<'a> TimezoneSpec<'a> {
    /// Provider lookup under [`DEFAULT_TIMEZONE_KEY`].
    pub fn provider(settings: &'a dyn SettingsProvider) -> Self {
        Self::Provider {
            settings,
            key: DEFAULT_TIMEZONE_KEY,
        }
    }

    pub fn provider_with_key(settings: &'a dyn SettingsProvider, key: &'a str) -> Self {
        Self::Provider { settings, key }
    }

    /// Resolve into a concrete zone.
    ///
    /// A provider that does not have the key yields UTC silently; this is
    /// the documented soft-fail for an unconfigured default, not an error,
    /// and `get` is never called in that case.
    pub fn resolve(self) -> Result<Zone> {
        match self {
            Self::Zone(zone) => Ok(zone),
            Self::Name(name) => name.parse(),
            Self::Provider { settings, key } => {
                if !settings.has(key) {
                    tracing::debug!(key, "no timezone in settings provider, falling back to UTC");
                    return Ok(Zone::UTC);
                }
                match settings.get(key) {
                    Some(TimezoneSetting::Zone(zone)) => Ok(zone),
                    Some(TimezoneSetting::Name(name)) => name.parse(),
                    None => Err(MomentError::InvalidTimezone {
                        message: format!(
                            "settings provider reported '{key}' present but returned no value"
                        ),
                    }),
                }
            }
        }
    }
}

impl<'a> From<&'a str> for TimezoneSpec<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl From<Zone> for TimezoneSpec<'_> {
    fn from(zone: Zone) -> Self {
        Self::Zone(zone)
    }
}

impl From<Tz> for TimezoneSpec<'_> {
    fn from(tz: Tz) -> Self {
        Self::Zone(Zone::Named(tz))
    }
}

impl From<FixedOffset> for TimezoneSpec<'_> {
    fn from(offset: FixedOffset) -> Self {
        Self::Zone(Zone::Fixed(offset))
    }
}
