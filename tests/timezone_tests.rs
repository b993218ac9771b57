use porta_moment::{
    MapSettings, MomentError, PortaMoment, SettingsProvider, TimezoneSetting, TimezoneSpec, Zone,
    DEFAULT_TIMEZONE_KEY,
};
use std::cell::Cell;

const ZONE: &str = "Pacific/Palau";
const WIRE_DATETIME: &str = "2023-03-20 07:38:17";
const LOCAL_DATETIME: &str = "2023-03-20 16:38:17";

struct RecordingSettings {
    value: Option<TimezoneSetting>,
    get_calls: Cell<u32>,
}

impl RecordingSettings {
    fn new(value: Option<TimezoneSetting>) -> Self {
        Self {
            value,
            get_calls: Cell::new(0),
        }
    }
}

impl SettingsProvider for RecordingSettings {
    fn has(&self, key: &str) -> bool {
        key == DEFAULT_TIMEZONE_KEY && self.value.is_some()
    }

    fn get(&self, key: &str) -> Option<TimezoneSetting> {
        self.get_calls.set(self.get_calls.get() + 1);
        if key == DEFAULT_TIMEZONE_KEY {
            self.value.clone()
        } else {
            None
        }
    }
}

#[test]
fn provider_supplies_timezone_name() {
    let settings = RecordingSettings::new(Some(TimezoneSetting::Name(ZONE.to_string())));
    let moment = PortaMoment::new(LOCAL_DATETIME, TimezoneSpec::provider(&settings)).unwrap();
    assert_eq!(moment.to_wire_string(), WIRE_DATETIME);
    assert_eq!(settings.get_calls.get(), 1);
}

#[test]
fn provider_supplies_zone_object() {
    let zone: Zone = ZONE.parse().unwrap();
    let settings = RecordingSettings::new(Some(TimezoneSetting::Zone(zone)));
    let moment = PortaMoment::new(LOCAL_DATETIME, TimezoneSpec::provider(&settings)).unwrap();
    assert_eq!(moment.to_wire_string(), WIRE_DATETIME);
}

#[test]
fn provider_without_key_falls_back_to_utc_silently() {
    let settings = RecordingSettings::new(None);
    let moment = PortaMoment::new(LOCAL_DATETIME, TimezoneSpec::provider(&settings)).unwrap();
    // Fell back to UTC, so the local wall time is the wire time.
    assert_eq!(moment.to_wire_string(), LOCAL_DATETIME);
    assert_eq!(moment.zone(), Zone::UTC);
    // get is never consulted for a key has() denied.
    assert_eq!(settings.get_calls.get(), 0);
}

#[test]
fn provider_with_custom_key() {
    let settings = MapSettings::new().with(
        "billing.timezone",
        TimezoneSetting::Name(ZONE.to_string()),
    );
    let spec = TimezoneSpec::provider_with_key(&settings, "billing.timezone");
    let moment = PortaMoment::new(LOCAL_DATETIME, spec).unwrap();
    assert_eq!(moment.to_wire_string(), WIRE_DATETIME);

    // The default key is not configured in this provider.
    let fallback =
        PortaMoment::new(LOCAL_DATETIME, TimezoneSpec::provider(&settings)).unwrap();
    assert_eq!(fallback.zone(), Zone::UTC);
}

#[test]
fn provider_returning_bad_name_is_an_error() {
    let settings =
        RecordingSettings::new(Some(TimezoneSetting::Name("Not/AZone".to_string())));
    let err = PortaMoment::new(LOCAL_DATETIME, TimezoneSpec::provider(&settings)).unwrap_err();
    assert!(matches!(err, MomentError::InvalidTimezone { .. }));
}

#[test]
fn invalid_timezone_string_is_an_error() {
    let err = PortaMoment::new(LOCAL_DATETIME, "17").unwrap_err();
    assert!(matches!(err, MomentError::InvalidTimezone { .. }));
    assert!(PortaMoment::from_wire_string(WIRE_DATETIME, "Not/AZone").is_err());
}

#[test]
fn fixed_offset_timezones() {
    // The usage pattern from billing integrations: a GMT offset string.
    let moment = PortaMoment::from_wire_string("2023-03-07 14:52:43", "GMT+03:00").unwrap();
    assert_eq!(
        moment.format_local(PortaMoment::WIRE_DATETIME_FORMAT),
        "2023-03-07 17:52:43"
    );
    assert_eq!(moment.to_wire_string(), "2023-03-07 14:52:43");
    assert_eq!(moment.zone().to_string(), "+03:00");

    let negative = PortaMoment::new("2023-03-07 14:52:43", "-0530").unwrap();
    assert_eq!(negative.to_wire_string(), "2023-03-07 20:22:43");
}

#[test]
fn malformed_wire_strings_are_parse_errors() {
    assert!(matches!(
        PortaMoment::from_wire_string("20.03.2023 07:38", "UTC").unwrap_err(),
        MomentError::Parse { .. }
    ));
    assert!(matches!(
        PortaMoment::from_wire_date_string("2023-03-20 07:38:17", "UTC").unwrap_err(),
        MomentError::Parse { .. }
    ));
    assert!(matches!(
        PortaMoment::new("half past nine", "UTC").unwrap_err(),
        MomentError::Parse { .. }
    ));
}
