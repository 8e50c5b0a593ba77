// Host-side tests for AR capability detection and the device-class heuristic.

use arview_core::*;
use std::cell::Cell;

struct CountingQuery {
    answer: Result<bool, ArError>,
    calls: Cell<u32>,
}

impl ArCapabilityQuery for CountingQuery {
    fn can_activate_ar(&self) -> Result<bool, ArError> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone()
    }
}

#[test]
fn detector_starts_incapable() {
    let d = CapabilityDetector::new(DeviceClass::Mobile);
    assert!(!d.is_capable());
    assert_eq!(d.device_class(), DeviceClass::Mobile);
}

#[test]
fn refresh_follows_the_query() {
    let mut d = CapabilityDetector::default();
    let yes = CountingQuery {
        answer: Ok(true),
        calls: Cell::new(0),
    };
    assert!(d.refresh(&yes));
    assert!(d.is_capable());
    assert_eq!(yes.calls.get(), 1);

    let no = CountingQuery {
        answer: Ok(false),
        calls: Cell::new(0),
    };
    assert!(!d.refresh(&no));
    assert!(!d.is_capable());
}

#[test]
fn query_errors_fail_closed() {
    let mut d = CapabilityDetector::new(DeviceClass::Desktop);
    d.refresh(&|| -> Result<bool, ArError> { Ok(true) });
    assert!(d.is_capable());
    let broken = CountingQuery {
        answer: Err(ArError::Query("canActivateAR threw".into())),
        calls: Cell::new(0),
    };
    assert!(!d.refresh(&broken));
    assert!(!d.is_capable());
}

#[test]
fn device_class_from_user_agents() {
    let cases = [
        (
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Mobile Safari/537.36",
            0,
            DeviceClass::Mobile,
        ),
        (
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
            5,
            DeviceClass::Mobile,
        ),
        (
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
            5,
            DeviceClass::Mobile,
        ),
        (
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
            0,
            DeviceClass::Desktop,
        ),
        (
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
            10,
            DeviceClass::Desktop,
        ),
        ("", 0, DeviceClass::Desktop),
    ];
    for (ua, touch, expected) in cases {
        assert_eq!(DeviceClass::from_signals(ua, touch), expected, "{ua}");
    }
}

#[test]
fn device_class_only_changes_hint_text() {
    assert_eq!(DeviceClass::Mobile.hint(), HINT_MOBILE);
    assert_eq!(DeviceClass::Desktop.hint(), HINT_DESKTOP);

    // A mobile guess does not make AR available
    let mut d = CapabilityDetector::new(DeviceClass::Mobile);
    d.refresh(&|| -> Result<bool, ArError> { Ok(false) });
    assert!(!d.is_capable());
}

#[test]
fn ar_status_strings_parse() {
    assert_eq!(ArStatus::parse("failed"), Some(ArStatus::Failed));
    assert_eq!(ArStatus::parse("not-presenting"), Some(ArStatus::NotPresenting));
    assert_eq!(ArStatus::parse("session-started"), Some(ArStatus::SessionStarted));
    assert_eq!(ArStatus::parse("object-placed"), Some(ArStatus::ObjectPlaced));
    assert_eq!(ArStatus::parse("FAILED"), None);
    assert_eq!(ArStatus::parse(""), None);
}
