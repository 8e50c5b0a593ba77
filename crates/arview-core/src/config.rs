use crate::constants::*;

/// Runtime configuration for one viewer instance.
///
/// Defaults come from `constants.rs`; the web frontend may override `source`
/// from markup before constructing the controller.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub source: Option<String>,
    pub target_extent: f32,
    pub facing_mode: &'static str,
    pub ids: ElementIds,
}

/// DOM ids of the regions and controls the frontend drives.
#[derive(Clone, Debug)]
pub struct ElementIds {
    pub toggle: &'static str,
    pub orbit_view: &'static str,
    pub ar_view: &'static str,
    pub camera_view: &'static str,
    pub camera_video: &'static str,
    pub error: &'static str,
    pub hint: &'static str,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            toggle: TOGGLE_ID,
            orbit_view: ORBIT_VIEW_ID,
            ar_view: AR_VIEW_ID,
            camera_view: CAMERA_VIEW_ID,
            camera_video: CAMERA_VIDEO_ID,
            error: ERROR_ID,
            hint: HINT_ID,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: None,
            target_extent: TARGET_EXTENT,
            facing_mode: CAMERA_FACING_MODE,
            ids: ElementIds::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.source = (!source.trim().is_empty()).then_some(source);
        self
    }
}
