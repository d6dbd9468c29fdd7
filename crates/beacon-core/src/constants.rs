// Scene layout and motion tuning shared by the web and native front ends.

// Ground
pub const GROUND_HEIGHT: f32 = -0.5;
pub const GROUND_SIZE: f32 = 20.0;
pub const GRID_DIVISIONS: u32 = 40;
pub const GRID_COLOR: u32 = 0x2d862d;
// Tint shown until the ground image loads
pub const GROUND_FALLBACK_COLOR: u32 = 0x1d2b22;

// Location marker (cone flipped point-down)
pub const MARKER_RADIUS: f32 = 1.0;
pub const MARKER_HEIGHT: f32 = 2.0;
pub const MARKER_SEGMENTS: u32 = 32;
pub const MARKER_BASE_HEIGHT: f32 = 1.0;
pub const MARKER_BOB_FREQ: f32 = 2.0;
pub const MARKER_BOB_AMPLITUDE: f32 = 0.1;
pub const MARKER_PULSE_AMPLITUDE: f32 = 0.05; // signage variant only

// Ground indicator disk
pub const INDICATOR_RADIUS: f32 = 1.5;
pub const INDICATOR_SEGMENTS: u32 = 32;
pub const INDICATOR_HEIGHT: f32 = -0.48; // just above the ground plane
pub const INDICATOR_SPIN_SPEED: f32 = 0.3; // rad/s, clockwise from above
pub const INDICATOR_PULSE_FREQ: f32 = 2.0;
pub const INDICATOR_BASE_OPACITY: f32 = 0.7;
pub const INDICATOR_OPACITY_AMPLITUDE: f32 = 0.2;
pub const INDICATOR_BASE_SCALE: f32 = 1.0;
pub const INDICATOR_SCALE_AMPLITUDE: f32 = 0.1;
pub const INDICATOR_TEXTURE_SIZE: u32 = 256;

// Orbiting spheres
pub const SPHERE_RADIUS: f32 = 0.5;
pub const SPHERE_SEGMENTS: u32 = 128;
pub const SPHERE_FALLBACK_COLOR: u32 = 0xb8c4d6;
pub const SPHERE_UV_REPEAT: f32 = 2.0;
pub const PRIMARY_BOB_AMPLITUDE: f32 = 0.2;
pub const PRIMARY_SPIN_Y_PER_FRAME: f32 = 0.01;
pub const PRIMARY_SPIN_X_PER_FRAME: f32 = 0.005;
pub const SIGNAGE_PRIMARY_Y_OFFSET: f32 = 0.5;
pub const SECONDARY_INITIAL_ANGLE: f64 = std::f64::consts::PI;
pub const SECONDARY_BOB_FREQ: f32 = 1.5;
pub const SECONDARY_BOB_AMPLITUDE: f32 = 0.3;
pub const SECONDARY_BOB_OFFSET: f32 = 0.7;
pub const SPHERE_LIGHT_RANGE: f32 = 5.0;
pub const SPHERE_LIGHT_DECAY: f32 = 2.0;

// Signage text
pub const SIGNAGE_TEXT: &str = "YOU ARE HERE";
pub const SIGNAGE_CELL: f32 = 0.08; // world size of one glyph pixel
pub const SIGNAGE_DEPTH: f32 = 0.08;
pub const SIGNAGE_HEIGHT: f32 = 3.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 5.0];
pub const CONTROLS_DAMPING: f32 = 0.05;
pub const CONTROLS_MIN_RADIUS: f32 = 1.0;
pub const CONTROLS_MAX_RADIUS: f32 = 40.0;

// Output
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;
pub const CLEAR_COLOR: [f64; 3] = [0.01, 0.01, 0.03];
