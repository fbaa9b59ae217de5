//! Hurry Hard - a deterministic curling delivery simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ice field, forces, collisions, scoring)
//! - `tuning`: Data-driven physics balance
//!
//! The engine is headless: it owns no clock, no I/O and no ambient
//! randomness. Callers drive it tick-by-tick with an explicit `dt` and a
//! seeded RNG, which makes every run reproducible bit-for-bit.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Sheet geometry constants (metres, world coordinates)
///
/// The sheet runs along +x from the hack at x = 0 toward the scoring house.
/// y is the cross-sheet axis, centered on the sheet's long axis.
pub mod consts {
    use glam::Vec2;

    /// Playable sheet extent along x covered by the ice grid
    pub const SHEET_LENGTH: f32 = 38.0;
    /// Half the sheet width; the sideboards sit at y = ±SHEET_HALF_WIDTH
    pub const SHEET_HALF_WIDTH: f32 = 2.375;

    /// Far hog line - a rock stopping short of this without contact is pulled
    pub const HOG_LINE_X: f32 = 28.0;
    /// Tee line through the center of the house
    pub const TEE_LINE_X: f32 = 34.0;
    /// Back line; a rock whose leading edge crosses it is out of play
    pub const BACK_LINE_X: f32 = 35.83;
    /// Center of the house, on the tee line
    pub const BUTTON: Vec2 = Vec2::new(TEE_LINE_X, 0.0);

    /// Delivery start point
    pub const HACK_X: f32 = 0.0;

    /// Running-surface radius of a rock
    pub const ROCK_RADIUS: f32 = 0.145;
    /// House ring radii, button outward (button, 4ft, 8ft, 12ft)
    pub const HOUSE_RADII: [f32; 4] = [0.15, 0.61, 1.22, 1.83];
    /// A rock counts for scoring within this distance of the button
    pub const SCORING_RADIUS: f32 = HOUSE_RADII[3] + ROCK_RADIUS;

    /// Full roster size for one end (8 per team)
    pub const MAX_ROCKS: usize = 16;

    /// Largest time delta a single tick will integrate; bigger deltas are
    /// clamped so a stalled driving clock cannot destabilize the physics
    pub const MAX_DT: f32 = 0.05;
    /// Default headless timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Hard cap on ticks per delivery; hitting it is reported, not raised
    pub const TICK_CAP: u32 = 10_000;

    /// Below this scalar speed a rock is considered at rest
    pub const STOP_EPS: f32 = 0.01;
}

/// Unit heading vector for an angle in radians
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Unit vector perpendicular to a heading (90 degrees counter-clockwise)
#[inline]
pub fn perp_vec(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), angle.cos())
}
