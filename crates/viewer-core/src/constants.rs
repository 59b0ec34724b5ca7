use glam::Vec3;

// Shared tuning constants for the viewer core and the native front-end.

// Command line defaults
pub const DEFAULT_MSAA: u32 = 16;
pub const DEFAULT_MAX_FPS: f64 = 144.0;

// Window
pub const WINDOW_TITLE: &str = "L3 Menger Cube";
pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;
pub const CLEAR_COLOR: [f64; 4] = [0.13, 0.13, 0.13, 0.0];

// Projection
pub const FOV_Y_DEGREES: f32 = 60.0;
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 120.0;

// Camera
pub const POINTER_SENSITIVITY: f32 = 0.001; // radians per pixel
pub const ZOOM_STEP: f32 = 0.06; // fraction of |zoom| per scroll notch
pub const SCROLL_PIXELS_PER_NOTCH: f32 = 50.0; // touchpad travel per notch
pub const INITIAL_ZOOM: f32 = -16.0;
pub const INITIAL_ELEVATION: f32 = std::f32::consts::FRAC_PI_2;
pub const INITIAL_AZIMUTH: f32 = 0.0;

// Idle animation
pub const IDLE_SPIN_RATE: f32 = 0.1; // azimuth radians per second
pub const IDLE_SWAY_FREQUENCY: f32 = 0.1;
pub const IDLE_DRIFT_INITIAL: f32 = 0.08;
pub const IDLE_DRIFT_GROWTH: f32 = 0.000001; // per idle tick
pub const COLOR_DRIFT_RATE: f32 = 1.6;
pub const LIGHT_ORBIT_RATE: f32 = 0.5;
pub const LIGHT_ORBIT_RADIUS: f32 = 10.0;

// Shading
pub const STATIC_LIGHT_POSITION: Vec3 = Vec3::ZERO;
pub const STARTUP_OPACITY: f32 = 0.5;
pub const MODE_SWITCH_OPACITY: f32 = 1.0;
pub const STARTUP_COLOR: Vec3 = Vec3::ONE;

// Diagnostics
pub const FPS_REPORT_MIN_INTERVAL_SEC: f64 = 2.0;

// Title easter egg (seconds)
pub const TITLE_HOLD_SEC: f64 = 6.0;
pub const TITLE_TYPE_SEC: f64 = 0.09;
pub const TITLE_TYPE_JITTER_SEC: f64 = 0.04;
