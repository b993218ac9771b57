pub mod config;
pub mod domain;
pub mod utils;

pub use config::MapSettings;
pub use domain::{
    Clock, PortaMoment, SettingsProvider, SystemClock, TimezoneSetting, TimezoneSpec, Zone,
    DEFAULT_TIMEZONE_KEY,
};
pub use utils::error::{MomentError, Result};
