//! The tick loop: headless deliveries and interactive multi-rock stepping
//!
//! Both entry points share `step_rock` so a batch run and a live game see
//! identical physics. Per tick: sample and integrate each moving rock in
//! ascending index order, evaporate moisture once, resolve collisions, then
//! apply boundary rules. `dt` is always explicit and clamped, never read
//! from a wall clock, so runs reproduce exactly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BACK_LINE_X, BUTTON, HOG_LINE_X, MAX_DT, ROCK_RADIUS, SCORING_RADIUS, SHEET_HALF_WIDTH,
    SIM_DT, STOP_EPS, TICK_CAP,
};
use crate::perp_vec;
use crate::sim::collision::resolve_collisions;
use crate::sim::forces::{step_rock, ForceBreakdown};
use crate::sim::ice::IceField;
use crate::sim::profile::IceProfile;
use crate::sim::rock::{paper_turns_jitter, RemoveReason, Rock, Team};
use crate::tuning::Tuning;

/// Nominal stopping distance at zero power (metres)
const POWER_BASE_RANGE: f32 = 25.75;
/// Extra nominal stopping distance per unit of power
const POWER_RANGE_GAIN: f32 = 20.0;

/// Launch speed for a power setting in [0, 1]
///
/// Derived from the tuning's own nominal friction so that power maps
/// near-linearly onto stopping distance: 0.1 dies short of the hog line,
/// 0.35-0.5 is draw weight, 0.95 runs through the back of the house.
pub fn launch_speed(power: f32, tuning: &Tuning) -> f32 {
    let range = POWER_BASE_RANGE + POWER_RANGE_GAIN * power.clamp(0.0, 1.0);
    let decel = tuning.nominal_friction() * tuning.friction_decel;
    (2.0 * decel * range / tuning.speed_scale.max(1e-6)).sqrt()
}

/// Check a rock against the removal rules; `None` means it stays
fn boundary_violation(rock: &Rock) -> Option<RemoveReason> {
    if rock.pos.x + ROCK_RADIUS > BACK_LINE_X {
        Some(RemoveReason::BackLine)
    } else if rock.pos.y.abs() + ROCK_RADIUS > SHEET_HALF_WIDTH {
        Some(RemoveReason::Sideboard)
    } else if rock.velocity < STOP_EPS
        && rock.pos.x + ROCK_RADIUS < HOG_LINE_X
        && !rock.has_contacted
    {
        Some(RemoveReason::HogLine)
    } else {
        None
    }
}

/// Advance a live roster by one tick
///
/// `sweeping` names the rock currently being swept, if any. Returns whether
/// any rock is still moving; callers keep ticking until this goes false.
pub fn tick(
    rocks: &mut [Rock],
    field: &mut IceField,
    dt: f32,
    tuning: &Tuning,
    sweeping: Option<usize>,
) -> bool {
    let dt = dt.min(MAX_DT);

    for idx in 0..rocks.len() {
        if !rocks[idx].in_play || rocks[idx].velocity <= 0.0 {
            continue;
        }
        let swept = sweeping == Some(idx);
        step_rock(&mut rocks[idx], field, tuning, dt, swept);
    }

    field.evaporate(dt);
    resolve_collisions(rocks);

    for idx in 0..rocks.len() {
        if !rocks[idx].in_play {
            continue;
        }
        if let Some(reason) = boundary_violation(&rocks[idx]) {
            log::debug!("rock {idx} removed: {}", reason.as_str());
            rocks[idx].remove(idx, reason);
        }
    }

    rocks.iter().any(|r| r.in_play && r.velocity > STOP_EPS)
}

/// Inputs for one headless delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryParams {
    /// Heading in radians; 0 aims straight down-sheet
    pub aim: f32,
    /// Throw weight in [0, 1]
    pub power: f32,
    /// Handle rotation, +1.0 or -1.0
    pub spin: f32,
    pub profile: IceProfile,
    /// Fixed roughness multiplier; `None` draws the 0.8-1.2 jitter from the
    /// seeded RNG
    pub paper_turns: Option<f32>,
    /// Sweep the whole way down
    pub sweep: bool,
    pub tuning: Tuning,
    /// Explicit timestep, clamped to `MAX_DT`
    pub dt: f32,
    /// Seed for profile generation and delivery jitter
    pub seed: u64,
}

impl Default for DeliveryParams {
    fn default() -> Self {
        Self {
            aim: 0.0,
            power: 0.4,
            spin: 1.0,
            profile: IceProfile::Championship,
            paper_turns: Some(1.0),
            sweep: false,
            tuning: Tuning::default(),
            dt: SIM_DT,
            seed: 0,
        }
    }
}

/// One tick of a delivery trace
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u32,
    pub pos: Vec2,
    pub velocity: f32,
    pub forces: ForceBreakdown,
}

/// Outcome of a delivery, asserted on by harnesses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySummary {
    /// Resting (or removal) position
    pub final_pos: Vec2,
    /// Total lateral displacement from the aim line
    pub total_curl: f32,
    pub distance_to_button: f32,
    pub in_house: bool,
    pub removed: bool,
    pub remove_reason: Option<RemoveReason>,
    pub ticks: u32,
    /// Simulated seconds elapsed
    pub elapsed: f32,
}

/// Full result of a headless delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub trace: Vec<TickSnapshot>,
    pub summary: DeliverySummary,
}

/// Run one rock from the hack to rest (or removal) on a fresh field
///
/// Deterministic for a given `DeliveryParams`: the seed drives both profile
/// generation and delivery jitter. A delivery that fails to settle within
/// `TICK_CAP` ticks is reported via `summary.ticks == TICK_CAP`, not raised.
pub fn simulate_delivery(params: &DeliveryParams) -> DeliveryResult {
    let mut rng = Pcg32::seed_from_u64(params.seed);
    let mut field = IceField::from_profile(params.profile, &mut rng);

    let paper_turns = params
        .paper_turns
        .unwrap_or_else(|| paper_turns_jitter(&mut rng));
    let mut rock = Rock::parked(Team::Red, 0);
    rock.deliver(
        params.aim,
        launch_speed(params.power, &params.tuning),
        params.spin,
        paper_turns,
    );

    let dt = params.dt.min(MAX_DT);
    let start = rock.pos;
    let aim_perp = perp_vec(params.aim);

    let mut trace = Vec::new();
    let mut final_pos = rock.pos;
    let mut ticks = 0u32;

    while ticks < TICK_CAP {
        let forces = step_rock(&mut rock, &mut field, &params.tuning, dt, params.sweep);
        ticks += 1;
        final_pos = rock.pos;
        trace.push(TickSnapshot {
            tick: ticks,
            pos: rock.pos,
            velocity: rock.velocity,
            forces,
        });
        field.evaporate(dt);

        if let Some(reason) = boundary_violation(&rock) {
            rock.remove(0, reason);
            break;
        }
        if rock.velocity <= 0.0 {
            break;
        }
    }

    if ticks == TICK_CAP && rock.remove_reason.is_none() && rock.velocity > 0.0 {
        log::warn!(
            "delivery hit the tick cap still moving (v = {:.3}); reporting as anomalous",
            rock.velocity
        );
    }

    let removed = rock.remove_reason.is_some();
    let distance_to_button = final_pos.distance(BUTTON);
    let summary = DeliverySummary {
        final_pos,
        total_curl: (final_pos - start).dot(aim_perp),
        distance_to_button,
        in_house: !removed && distance_to_button <= SCORING_RADIUS,
        removed,
        remove_reason: rock.remove_reason,
        ticks,
        elapsed: ticks as f32 * dt,
    };

    DeliveryResult { trace, summary }
}
