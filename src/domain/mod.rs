// Domain layer: the moment value type and its ports.

pub mod moment;
pub mod ports;
pub mod timezone;

mod calendar;
mod expr;

pub use moment::PortaMoment;
pub use ports::{Clock, SettingsProvider, SystemClock};
pub use timezone::{TimezoneSetting, TimezoneSpec, Zone, DEFAULT_TIMEZONE_KEY};
