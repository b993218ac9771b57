use crate::domain::ports::SettingsProvider;
use crate::domain::timezone::TimezoneSetting;
use std::collections::HashMap;

/// In-memory settings provider, handy for wiring a default timezone from
/// application config and for tests.
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: HashMap<String, TimezoneSetting>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: TimezoneSetting) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl SettingsProvider for MapSettings {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<TimezoneSetting> {
        self.values.get(key).cloned()
    }
}
