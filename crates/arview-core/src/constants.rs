// Shared framing, camera and UI constants used by the core and the web frontend.

// Asset framing
pub const TARGET_EXTENT: f32 = 2.0; // largest axis after normalization (fills a 2-unit cube)
pub const FALLBACK_EXTENT: f32 = 1.0; // used when the bounding box is empty or zero-volume

// Camera capture
pub const CAMERA_FACING_MODE: &str = "environment"; // rear camera on phones

// Toggle labels
pub const LABEL_EXIT_AR: &str = "Exit AR";
pub const LABEL_VIEW_IN_AR: &str = "View in AR";
pub const LABEL_STOP_CAMERA: &str = "Stop Camera";
pub const LABEL_OPEN_CAMERA: &str = "Open Camera";

// Hint text (device class only affects wording)
pub const HINT_MOBILE: &str = "Point your camera at the floor to place the model";
pub const HINT_DESKTOP: &str = "AR works best on a phone or tablet";

// Default DOM element ids
pub const TOGGLE_ID: &str = "view-toggle";
pub const ORBIT_VIEW_ID: &str = "orbit-view";
pub const AR_VIEW_ID: &str = "ar-view";
pub const CAMERA_VIEW_ID: &str = "camera-view";
pub const CAMERA_VIDEO_ID: &str = "camera-video";
pub const ERROR_ID: &str = "viewer-error";
pub const HINT_ID: &str = "viewer-hint";
