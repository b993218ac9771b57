use crate::domain::timezone::TimezoneSetting;
use chrono::{DateTime, Utc};

/// Settings lookup consumed while resolving a default timezone at
/// construction time. `get` is only ever called for a key that `has`
/// reported present; returning `None` anyway is a provider contract
/// violation and surfaces as an error.
pub trait SettingsProvider {
    fn has(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Option<TimezoneSetting>;
}

/// Wall-clock capability behind `is_in_future`/`is_in_past` and
/// relative datetime expressions.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
