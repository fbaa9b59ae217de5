//! Data-driven physics balance
//!
//! Every coefficient the force model and ice model consume lives here, so a
//! harness can adjust feel between deliveries without touching the engine.
//! A `Tuning` is immutable for the duration of one tick loop; the core does
//! not validate out-of-range values.

use serde::{Deserialize, Serialize};

/// Physics coefficients for one simulation instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Friction of bare, pebble-free ice
    pub base_friction: f32,
    /// Extra friction per unit of pebble height
    pub pebble_friction_bonus: f32,
    /// Friction removed per unit of cell moisture
    pub moisture_coeff: f32,
    /// Friction added per unit of temperature deviation (colder = less)
    pub temp_coeff: f32,
    /// Lower bound on sampled friction
    pub friction_floor: f32,

    /// Strength of spin-induced lateral curl
    pub curl_coeff: f32,
    /// Strength of drift from cross-heading friction gradients
    pub gradient_coeff: f32,
    /// Acceleration per unit of ice grade
    pub slope_gravity: f32,
    /// Longitudinal deceleration per unit of sampled friction
    pub friction_decel: f32,
    /// World-units travelled per unit velocity per second
    pub speed_scale: f32,

    /// Pebble degraded per second under a running rock
    pub wear_rate: f32,
    /// Velocity added per second to an actively swept rock
    pub sweep_boost: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_friction: 0.08,
            pebble_friction_bonus: 0.07,
            moisture_coeff: 0.05,
            temp_coeff: 0.01,
            friction_floor: 0.01,
            curl_coeff: 4.0,
            gradient_coeff: 8.0,
            slope_gravity: 18.0,
            friction_decel: 3.2,
            speed_scale: 60.0,
            wear_rate: 0.0015,
            sweep_boost: 0.03,
        }
    }
}

impl Tuning {
    /// Friction a rock sees on fresh ice (pebble at full height, dry)
    ///
    /// Used to calibrate launch speed against the active coefficients.
    pub fn nominal_friction(&self) -> f32 {
        (self.base_friction + self.pebble_friction_bonus).max(self.friction_floor)
    }
}
