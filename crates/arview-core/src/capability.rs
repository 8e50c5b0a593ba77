use crate::constants::{HINT_DESKTOP, HINT_MOBILE};
use crate::error::ArError;

/// Anything that can answer "can a true AR session start right now?".
///
/// The web frontend implements this over the AR element; tests use closures.
pub trait ArCapabilityQuery {
    fn can_activate_ar(&self) -> Result<bool, ArError>;
}

impl<F> ArCapabilityQuery for F
where
    F: Fn() -> Result<bool, ArError>,
{
    fn can_activate_ar(&self) -> Result<bool, ArError> {
        self()
    }
}

/// Rough device class guessed from browser signals.
///
/// Only used to pick hint wording. It never decides whether AR is offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn from_signals(user_agent: &str, max_touch_points: i32) -> Self {
        const MOBILE_TOKENS: [&str; 5] = ["Android", "iPhone", "iPad", "iPod", "Mobile"];
        if MOBILE_TOKENS.iter().any(|t| user_agent.contains(t)) {
            return DeviceClass::Mobile;
        }
        // iPadOS reports a desktop Safari UA but has a touch screen
        if user_agent.contains("Macintosh") && max_touch_points > 1 {
            return DeviceClass::Mobile;
        }
        DeviceClass::Desktop
    }

    pub fn hint(self) -> &'static str {
        match self {
            DeviceClass::Mobile => HINT_MOBILE,
            DeviceClass::Desktop => HINT_DESKTOP,
        }
    }
}

/// Holds the current AR capability. Fails closed.
#[derive(Clone, Debug, Default)]
pub struct CapabilityDetector {
    capable: bool,
    device_class: DeviceClass,
}

impl CapabilityDetector {
    pub fn new(device_class: DeviceClass) -> Self {
        Self {
            capable: false,
            device_class,
        }
    }

    #[inline]
    pub fn is_capable(&self) -> bool {
        self.capable
    }

    #[inline]
    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    /// Re-query the surface. A failed query counts as "not capable".
    pub fn refresh(&mut self, query: &impl ArCapabilityQuery) -> bool {
        let capable = match query.can_activate_ar() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[ar] {}", e);
                false
            }
        };
        if capable != self.capable {
            log::info!("[ar] capability changed: {} -> {}", self.capable, capable);
        }
        self.capable = capable;
        capable
    }
}
