//! Named ice profiles
//!
//! A profile is a pure initializer over a fresh `IceField`. The set is
//! closed and dispatched by exhaustive matching; only `Discovery` consumes
//! the RNG, scattering hidden terrain the player has to read shot by shot.

use std::f32::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{SHEET_HALF_WIDTH, SHEET_LENGTH, TEE_LINE_X};
use crate::sim::ice::IceField;

/// The closed set of ice conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IceProfile {
    /// Flat, fresh, uniform pebble; the reference surface for tests
    #[default]
    Championship,
    /// Well-kept club ice: slightly tired pebble, mild edge slopes
    Club,
    /// Arena ice over a hockey rink: warm patches and frost heave
    Arena,
    /// Heavily pebbled with strong cross-sheet grades; big sweeping curl
    Swingy,
    /// Randomized hidden terrain drawn from the seeded RNG
    Discovery,
}

impl IceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            IceProfile::Championship => "championship",
            IceProfile::Club => "club",
            IceProfile::Arena => "arena",
            IceProfile::Swingy => "swingy",
            IceProfile::Discovery => "discovery",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "championship" => Some(IceProfile::Championship),
            "club" => Some(IceProfile::Club),
            "arena" => Some(IceProfile::Arena),
            "swingy" => Some(IceProfile::Swingy),
            "discovery" => Some(IceProfile::Discovery),
            _ => None,
        }
    }

    /// Populate a fresh field with this profile's initial state
    pub fn apply(&self, field: &mut IceField, rng: &mut Pcg32) {
        match self {
            IceProfile::Championship => {
                // IceField::new() is already flat and fully pebbled
            }
            IceProfile::Club => apply_club(field),
            IceProfile::Arena => apply_arena(field),
            IceProfile::Swingy => apply_swingy(field),
            IceProfile::Discovery => apply_discovery(field, rng),
        }
    }
}

/// Convenience: build a field directly from a profile
impl IceField {
    pub fn from_profile(profile: IceProfile, rng: &mut Pcg32) -> Self {
        let mut field = IceField::new();
        profile.apply(&mut field, rng);
        field
    }
}

fn apply_club(field: &mut IceField) {
    field.for_each_cell(|wx, wy, cell| {
        // Tired pebble with a gentle lengthwise ripple from the nipper
        cell.pebble_height = 0.9 + 0.05 * (wx * 0.8).sin();
        // The sheet sags slightly toward both sideboards
        let edge = wy / SHEET_HALF_WIDTH;
        cell.slope_y = 0.0015 * edge * edge * edge;
        cell.temperature = -0.1;
    });
}

fn apply_arena(field: &mut IceField) {
    field.for_each_cell(|wx, wy, cell| {
        cell.pebble_height = 0.85 + 0.15 * (wx * 0.45).sin() * (wy * 1.3).cos();
        // Warm strip over the buried hockey lines mid-sheet
        let warm = (-((wx - SHEET_LENGTH * 0.5) / 6.0).powi(2)).exp();
        cell.temperature = 0.35 * warm - 0.05;
        // Frost heave: long-wave rolls along the sheet
        cell.slope_x = 0.002 * (wx * 0.3).sin();
        cell.slope_y = 0.003 * (wx * 0.2 + 1.1).cos();
    });
}

fn apply_swingy(field: &mut IceField) {
    field.for_each_cell(|wx, wy, cell| {
        cell.pebble_height = 1.15;
        // Crowned sheet: everything runs off-center, strongest mid-sheet
        let crown = (PI * wx / SHEET_LENGTH).sin();
        cell.slope_y = 0.005 * crown * if wy >= 0.0 { 1.0 } else { -1.0 };
        cell.temperature = -0.2;
    });
}

/// Randomized hidden terrain: a dish, a trough, one sloped corner, a warm
/// spot and a lane of prior wear, all placed by the seeded RNG
fn apply_discovery(field: &mut IceField, rng: &mut Pcg32) {
    // Dish: a shallow bowl somewhere in the scoring half
    let dish_x = rng.random_range(SHEET_LENGTH * 0.55..SHEET_LENGTH * 0.95);
    let dish_y = rng.random_range(-1.2..1.2);
    let dish_radius = rng.random_range(1.5..3.0);
    let dish_grade = rng.random_range(0.002..0.006);

    // Trough: a lengthwise channel the rocks fall into
    let trough_y = rng.random_range(-1.5..1.5);
    let trough_width = rng.random_range(0.6..1.2);
    let trough_grade = rng.random_range(0.002..0.005);

    // One corner of the sheet tilts toward the boards
    let corner_x_sign: f32 = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let corner_y_sign: f32 = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let corner_grade = rng.random_range(0.001..0.004);

    // Warm spot: softer, slicker, faster-wearing patch
    let warm_x = rng.random_range(SHEET_LENGTH * 0.3..SHEET_LENGTH * 0.9);
    let warm_y = rng.random_range(-1.5..1.5);
    let warm_strength = rng.random_range(0.2..0.5);

    // Prior wear: a lane polished by earlier traffic near the tee line
    let lane_y = rng.random_range(-0.8..0.8);
    let lane_depth = rng.random_range(0.15..0.35);

    field.for_each_cell(|wx, wy, cell| {
        // Dish pulls everything toward its center inside its radius
        let dx = wx - dish_x;
        let dy = wy - dish_y;
        let dish_dist = (dx * dx + dy * dy).sqrt();
        if dish_dist < dish_radius && dish_dist > 1e-3 {
            let pull = dish_grade * (1.0 - dish_dist / dish_radius);
            cell.slope_x -= pull * dx / dish_dist;
            cell.slope_y -= pull * dy / dish_dist;
        }

        // Trough pulls cross-sheet toward its centerline
        let off = wy - trough_y;
        if off.abs() < trough_width {
            cell.slope_y -= trough_grade * (off / trough_width);
        }

        // Corner slope in one quadrant of the scoring half
        if (wx - SHEET_LENGTH * 0.5) * corner_x_sign > 0.0 && wy * corner_y_sign > 0.0 {
            cell.slope_x += corner_grade * corner_x_sign * 0.5;
            cell.slope_y += corner_grade * corner_y_sign;
        }

        // Warm spot: gaussian temperature bump
        let wd2 = (wx - warm_x).powi(2) + (wy - warm_y).powi(2);
        cell.temperature += warm_strength * (-wd2 / 2.0).exp();

        // Prior wear lane running the length of the scoring end
        if wx > TEE_LINE_X - 10.0 {
            let lane = (-((wy - lane_y) / 0.5).powi(2)).exp();
            cell.pebble_height = (cell.pebble_height - lane_depth * lane).max(0.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;

    #[test]
    fn championship_is_uniform_and_flat() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = IceField::from_profile(IceProfile::Championship, &mut rng);
        let tuning = Tuning::default();
        let a = field.sample_friction(5.0, -1.0, &tuning);
        let b = field.sample_friction(30.0, 1.5, &tuning);
        assert!((a - b).abs() < 1e-6);
        assert_eq!(field.sample_slope(20.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn discovery_is_deterministic_per_seed() {
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        let a = IceField::from_profile(IceProfile::Discovery, &mut rng_a);
        let b = IceField::from_profile(IceProfile::Discovery, &mut rng_b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn discovery_varies_with_seed() {
        let mut rng_a = Pcg32::seed_from_u64(1);
        let mut rng_b = Pcg32::seed_from_u64(2);
        let a = IceField::from_profile(IceProfile::Discovery, &mut rng_a);
        let b = IceField::from_profile(IceProfile::Discovery, &mut rng_b);
        assert_ne!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn swingy_has_cross_slope_mid_sheet() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = IceField::from_profile(IceProfile::Swingy, &mut rng);
        let (_, sy_above) = field.sample_slope(SHEET_LENGTH / 2.0, 1.0);
        let (_, sy_below) = field.sample_slope(SHEET_LENGTH / 2.0, -1.0);
        assert!(sy_above > 0.0);
        assert!(sy_below < 0.0);
    }

    #[test]
    fn profile_names_round_trip() {
        for p in [
            IceProfile::Championship,
            IceProfile::Club,
            IceProfile::Arena,
            IceProfile::Swingy,
            IceProfile::Discovery,
        ] {
            assert_eq!(IceProfile::from_str(p.as_str()), Some(p));
        }
        assert_eq!(IceProfile::from_str("lake"), None);
    }
}
