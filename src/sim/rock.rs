//! Rock state and roster management
//!
//! Rocks live through one round as `parked -> in play -> (stopped | removed)`.
//! A removed rock is parked off-sheet with zero velocity and stays read-only
//! until the round resets; only a collision can wake a stopped rock that is
//! still in play.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{HACK_X, MAX_ROCKS};

/// The two sides of an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Red,
    Yellow,
}

/// Why a rock left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveReason {
    /// Leading edge crossed the back line
    BackLine,
    /// Touched a sideboard
    Sideboard,
    /// Came to rest short of the hog line without contacting another rock
    HogLine,
}

impl RemoveReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoveReason::BackLine => "back_line",
            RemoveReason::Sideboard => "sideboard",
            RemoveReason::HogLine => "hog_line",
        }
    }
}

/// One curling rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub pos: Vec2,
    /// Heading in radians; +x is down-sheet toward the house
    pub angle: f32,
    /// Scalar speed along the heading, never negative
    pub velocity: f32,
    /// Handle rotation: +1.0 counter-clockwise (curls +y), -1.0 clockwise
    pub spin: f32,
    /// Per-delivery running-band roughness multiplier, drawn in 0.8..1.2
    pub paper_turns: f32,
    pub team: Team,
    /// False while parked or removed
    pub in_play: bool,
    /// Set once the rock has touched any other rock this delivery
    pub has_contacted: bool,
    /// Terminal removal state; `None` while parked or in play
    pub remove_reason: Option<RemoveReason>,
}

impl Rock {
    /// An inert rock parked at its off-sheet slot
    pub fn parked(team: Team, slot: usize) -> Self {
        Self {
            pos: park_position(team, slot),
            angle: 0.0,
            velocity: 0.0,
            spin: 1.0,
            paper_turns: 1.0,
            team,
            in_play: false,
            has_contacted: false,
            remove_reason: None,
        }
    }

    /// Activate this rock at the hack with fresh delivery state
    pub fn deliver(&mut self, aim: f32, launch_speed: f32, spin: f32, paper_turns: f32) {
        self.pos = Vec2::new(HACK_X, 0.0);
        self.angle = aim;
        self.velocity = launch_speed.max(0.0);
        self.spin = if spin < 0.0 { -1.0 } else { 1.0 };
        self.paper_turns = paper_turns;
        self.in_play = true;
        self.has_contacted = false;
        self.remove_reason = None;
    }

    /// Take this rock out of play: zero velocity, park it, record why
    pub fn remove(&mut self, slot: usize, reason: RemoveReason) {
        self.velocity = 0.0;
        self.in_play = false;
        self.remove_reason = Some(reason);
        self.pos = park_position(self.team, slot);
    }

    /// Distance from rock center to the button
    pub fn distance_to_button(&self) -> f32 {
        self.pos.distance(crate::consts::BUTTON)
    }
}

/// Off-sheet parking slot for a rock, behind the hack
pub fn park_position(team: Team, slot: usize) -> Vec2 {
    let side = match team {
        Team::Red => -1.0,
        Team::Yellow => 1.0,
    };
    Vec2::new(-1.5 - 0.35 * (slot % 8) as f32, side * 1.2)
}

/// A fresh roster for one end: slots 0..8 red, 8..16 yellow, all parked
pub fn new_roster() -> Vec<Rock> {
    (0..MAX_ROCKS)
        .map(|slot| {
            let team = if slot < MAX_ROCKS / 2 {
                Team::Red
            } else {
                Team::Yellow
            };
            Rock::parked(team, slot)
        })
        .collect()
}

/// Draw the per-delivery roughness jitter from the caller's seeded RNG
pub fn paper_turns_jitter(rng: &mut Pcg32) -> f32 {
    rng.random_range(0.8..1.2)
}
