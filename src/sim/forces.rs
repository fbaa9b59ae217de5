//! Per-tick force model for a single rock
//!
//! All lateral effects (spin curl, gradient drift, cross-sheet slope) are
//! shaped by `v_factor`, which pins curl to zero both at rest and at high
//! speed. The chosen curve is `(v/p) * e^(1 - v/p)` with `p` =
//! `CURL_PEAK_SPEED`: zero at v = 0, a single peak of exactly 1.0 at v = p,
//! decaying toward zero as v grows.
//!
//! Sign convention (authoritative): `spin = +1.0` is counter-clockwise
//! handle rotation viewed from above and curls the rock toward positive y;
//! `spin = -1.0` mirrors it. Positive `slope_x`/`slope_y` is downhill
//! toward +x/+y.

use serde::{Deserialize, Serialize};

use crate::consts::ROCK_RADIUS;
use crate::perp_vec;
use crate::sim::ice::IceField;
use crate::sim::rock::Rock;
use crate::tuning::Tuning;

/// Speed at which the curl shaping factor peaks
pub const CURL_PEAK_SPEED: f32 = 0.8;

/// Fraction of the rock radius at which the gradient probes sample
const GRADIENT_PROBE_FRACTION: f32 = 0.75;

/// Minimum speed for a sweep boost to apply
const SWEEP_MIN_SPEED: f32 = 0.3;

/// Velocity-shaping factor for lateral forces
///
/// Exactly 0 at rest, peaks at 1.0 at `CURL_PEAK_SPEED`, decays toward 0 at
/// high speed.
#[inline]
pub fn v_factor(v: f32) -> f32 {
    let u = v / CURL_PEAK_SPEED;
    u * (1.0 - u).exp()
}

/// Diagnostic breakdown of one tick's force evaluation
///
/// Returned to the caller; never stored on the rock itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ForceBreakdown {
    /// Friction sampled under the rock center
    pub friction: f32,
    /// Lateral velocity from spin curl
    pub curl: f32,
    /// Lateral velocity from the cross-heading friction gradient
    pub gradient_drift: f32,
    /// Lateral velocity from cross-sheet grade
    pub slope_lateral: f32,
    /// Longitudinal acceleration from along-sheet grade
    pub slope_longitudinal: f32,
    /// Velocity added by sweeping this tick (already integrated)
    pub sweep_boost: f32,
}

/// Advance one rock by one tick: forces, integration, wear
///
/// Integration order is fixed: deceleration and sweep boost, then lateral
/// forces summed into y, then the half-weighted longitudinal slope, then
/// position advance along the heading, then wear at the new position.
pub fn step_rock(
    rock: &mut Rock,
    field: &mut IceField,
    tuning: &Tuning,
    dt: f32,
    swept: bool,
) -> ForceBreakdown {
    let friction = field.sample_friction(rock.pos.x, rock.pos.y, tuning);

    rock.velocity = (rock.velocity - friction * tuning.friction_decel * dt).max(0.0);
    let mut boost = 0.0;
    if swept && rock.velocity > SWEEP_MIN_SPEED {
        boost = tuning.sweep_boost * dt;
        rock.velocity += boost;
    }

    let vf = v_factor(rock.velocity);
    let curl = rock.spin * rock.paper_turns * friction * tuning.curl_coeff * vf;

    let probe = perp_vec(rock.angle) * (ROCK_RADIUS * GRADIENT_PROBE_FRACTION);
    let left = field.sample_friction(rock.pos.x + probe.x, rock.pos.y + probe.y, tuning);
    let right = field.sample_friction(rock.pos.x - probe.x, rock.pos.y - probe.y, tuning);
    let gradient_drift = (left - right) * tuning.gradient_coeff * vf;

    let (slope_x, slope_y) = field.sample_slope(rock.pos.x, rock.pos.y);
    // A stopped rock is held by static friction, not pulled by gravity
    let slope_scale = (rock.velocity * 2.0).min(1.0);
    let slope_lateral = slope_y * tuning.slope_gravity * slope_scale;
    let slope_longitudinal = slope_x * tuning.slope_gravity * slope_scale;

    rock.pos.y += (curl + gradient_drift + slope_lateral) * dt;
    rock.velocity = (rock.velocity + slope_longitudinal * dt * 0.5).max(0.0);

    rock.pos.x += rock.angle.cos() * rock.velocity * dt * tuning.speed_scale;
    rock.pos.y += rock.angle.sin() * rock.velocity * dt * tuning.speed_scale;

    field.apply_wear(rock.pos.x, rock.pos.y, dt, swept, tuning.wear_rate);

    ForceBreakdown {
        friction,
        curl,
        gradient_drift,
        slope_lateral,
        slope_longitudinal,
        sweep_boost: boost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rock::Team;

    #[test]
    fn v_factor_boundary_conditions() {
        assert_eq!(v_factor(0.0), 0.0);
        assert!((v_factor(CURL_PEAK_SPEED) - 1.0).abs() < 1e-6);
        // Single peak: rises before, falls after
        assert!(v_factor(CURL_PEAK_SPEED * 0.5) < 1.0);
        assert!(v_factor(CURL_PEAK_SPEED * 2.0) < 1.0);
        // Decays toward zero at high speed
        assert!(v_factor(CURL_PEAK_SPEED * 10.0) < 0.01);
    }

    fn test_rock(spin: f32) -> Rock {
        let mut rock = Rock::parked(Team::Red, 0);
        rock.deliver(0.0, 0.7, spin, 1.0);
        rock
    }

    #[test]
    fn curl_sign_follows_spin() {
        let tuning = Tuning::default();
        let mut field = IceField::new();
        let mut ccw = test_rock(1.0);
        let mut cw = test_rock(-1.0);

        let fb_ccw = step_rock(&mut ccw, &mut field, &tuning, 0.016, false);
        let fb_cw = step_rock(&mut cw, &mut field, &tuning, 0.016, false);
        assert!(fb_ccw.curl > 0.0);
        assert!(fb_cw.curl < 0.0);
        assert!((fb_ccw.curl + fb_cw.curl).abs() < 1e-4);
    }

    #[test]
    fn deceleration_floors_at_zero() {
        let tuning = Tuning::default();
        let mut field = IceField::new();
        let mut rock = test_rock(1.0);
        rock.velocity = 0.001;

        step_rock(&mut rock, &mut field, &tuning, 0.05, false);
        assert_eq!(rock.velocity, 0.0);
        // And a stopped rock stays put: no slope pull, no curl
        let fb = step_rock(&mut rock, &mut field, &tuning, 0.05, false);
        assert_eq!(rock.velocity, 0.0);
        assert_eq!(fb.curl, 0.0);
        assert_eq!(fb.slope_lateral, 0.0);
    }

    #[test]
    fn sweep_boost_requires_speed() {
        let tuning = Tuning::default();
        let mut field = IceField::new();

        let mut fast = test_rock(1.0);
        fast.velocity = 0.7;
        let fb = step_rock(&mut fast, &mut field, &tuning, 0.016, true);
        assert!(fb.sweep_boost > 0.0);

        let mut slow = test_rock(1.0);
        slow.velocity = 0.1;
        let fb = step_rock(&mut slow, &mut field, &tuning, 0.016, true);
        assert_eq!(fb.sweep_boost, 0.0);
    }

    #[test]
    fn gradient_drifts_toward_slicker_ice() {
        let tuning = Tuning::default();
        let mut field = IceField::new();
        // Slicker ice on the +y side of the rock: less pebble above center
        field.for_each_cell(|_, wy, c| {
            if wy > 0.0 {
                c.pebble_height = 0.2;
            }
        });
        let mut rock = test_rock(1.0);
        rock.spin = 1.0;
        rock.pos.y = 0.0;
        let tuning_no_curl = Tuning {
            curl_coeff: 0.0,
            ..tuning
        };
        let fb = step_rock(&mut rock, &mut field, &tuning_no_curl, 0.016, false);
        // left probe (+y) sees lower friction, so drift pulls negative
        assert!(fb.gradient_drift < 0.0);
    }

    #[test]
    fn downslope_accelerates_cross_slope_deflects() {
        let tuning = Tuning::default();
        let mut field = IceField::new();
        field.for_each_cell(|_, _, c| {
            c.slope_x = 0.005;
            c.slope_y = 0.003;
        });
        let mut rock = test_rock(1.0);
        rock.velocity = 0.6;
        let before = rock.velocity;
        let fb = step_rock(&mut rock, &mut field, &tuning, 0.016, false);
        assert!(fb.slope_longitudinal > 0.0);
        assert!(fb.slope_lateral > 0.0);
        // Net of friction decel the downslope keeps it faster than friction alone
        let mut flat = test_rock(1.0);
        flat.velocity = before;
        let mut flat_field = IceField::new();
        step_rock(&mut flat, &mut flat_field, &tuning, 0.016, false);
        assert!(rock.velocity > flat.velocity);
    }
}
