//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Explicit timestep only, clamped to `consts::MAX_DT`
//! - Seeded RNG only
//! - Stable iteration order (ascending rock index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod forces;
pub mod ice;
pub mod profile;
pub mod rock;
pub mod score;
pub mod tick;

pub use collision::resolve_collisions;
pub use forces::{ForceBreakdown, v_factor};
pub use ice::{Cell, IceField, CELL_SIZE, GRID_COLS, GRID_ROWS};
pub use profile::IceProfile;
pub use rock::{new_roster, paper_turns_jitter, RemoveReason, Rock, Team};
pub use score::{score_round, EndScore};
pub use tick::{
    launch_speed, simulate_delivery, tick, DeliveryParams, DeliveryResult, DeliverySummary,
    TickSnapshot,
};
