//! Shared application-wide constants.
//! Centralizes tweakable values used across projection, gestures, storage and the screens.

// Board geometry
/// Width of one isometric tile in pixels (2:1 diamond).
pub const TILE_W: f32 = 64.0;
/// Height of one isometric tile in pixels.
pub const TILE_H: f32 = 32.0;
/// Number of logical columns on the city board.
pub const MAP_W: i32 = 20;
/// Number of logical rows on the city board.
pub const MAP_H: i32 = 20;

// Viewport
/// Smallest zoom scale a gesture may produce.
pub const MIN_ZOOM: f32 = 0.5;
/// Largest zoom scale a gesture may produce.
pub const MAX_ZOOM: f32 = 2.0;
/// Zoom scale the board settles back to after a pinch released below it.
pub const SOFT_MIN_ZOOM: f32 = 0.6;
/// Duration of the post-pinch settle animation, in seconds.
pub const SETTLE_DURATION: f64 = 0.3;
/// Zoom change applied per scroll-wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 0.025;
/// Scroll distance in points that counts as one wheel notch (egui's native line height).
pub const WHEEL_NOTCH_POINTS: f32 = 40.0;

// Rewards
/// Columns of the plot that new reward buildings are dropped into.
pub const REWARD_PLOT_W: i32 = 6;
/// Rows of the plot that new reward buildings are dropped into.
pub const REWARD_PLOT_H: i32 = 6;
/// Default length of one focus session, in seconds.
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

// Storage
/// Key under which the building list is stored.
pub const BUILDINGS_KEY: &str = "cityBuildings";
/// Key under which UI settings are persisted through eframe.
pub const APP_STATE_KEY: &str = "app_state";

// Sprites
/// Sprite size used for building types that are not in the catalog.
pub const FALLBACK_SPRITE: (f32, f32) = (64.0, 96.0);
/// Sprite size of the placeholder building shown in an empty city.
pub const DEMO_SPRITE: (f32, f32) = (256.0, 320.0);
