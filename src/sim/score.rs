//! End-of-round scoring
//!
//! Only rocks still in play and within the scoring radius of the button
//! count. The team with the rock closest to the button scores one point per
//! rock strictly closer than the opposing team's best; an exact tie between
//! the two best rocks is a blank end for both teams.

use serde::{Deserialize, Serialize};

use crate::consts::SCORING_RADIUS;
use crate::sim::rock::{Rock, Team};

/// Result of scoring one end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndScore {
    /// `None` on a blank end
    pub team: Option<Team>,
    pub points: u32,
}

impl EndScore {
    pub fn blank() -> Self {
        Self {
            team: None,
            points: 0,
        }
    }
}

/// Score the end from final rock positions
pub fn score_round(rocks: &[Rock]) -> EndScore {
    let mut red = counting_distances(rocks, Team::Red);
    let mut yellow = counting_distances(rocks, Team::Yellow);
    red.sort_by(f32::total_cmp);
    yellow.sort_by(f32::total_cmp);

    match (red.first(), yellow.first()) {
        (None, None) => EndScore::blank(),
        (Some(_), None) => EndScore {
            team: Some(Team::Red),
            points: red.len() as u32,
        },
        (None, Some(_)) => EndScore {
            team: Some(Team::Yellow),
            points: yellow.len() as u32,
        },
        (Some(&best_red), Some(&best_yellow)) => {
            if best_red < best_yellow {
                EndScore {
                    team: Some(Team::Red),
                    points: red.iter().filter(|&&d| d < best_yellow).count() as u32,
                }
            } else if best_yellow < best_red {
                EndScore {
                    team: Some(Team::Yellow),
                    points: yellow.iter().filter(|&&d| d < best_red).count() as u32,
                }
            } else {
                // Dead tie on the measurement: nobody scores
                EndScore::blank()
            }
        }
    }
}

/// Button distances of one team's counting rocks
fn counting_distances(rocks: &[Rock], team: Team) -> Vec<f32> {
    rocks
        .iter()
        .filter(|r| r.team == team && r.in_play)
        .map(Rock::distance_to_button)
        .filter(|&d| d <= SCORING_RADIUS)
        .collect()
}
