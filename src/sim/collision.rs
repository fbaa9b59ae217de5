//! Impulse-based rock-on-rock collision resolution
//!
//! Runs once per tick after every rock has moved. Pairs iterate in ascending
//! index order so simultaneous multi-way contacts resolve reproducibly. The
//! O(n^2) pass is deliberate: the roster is capped at sixteen rocks, so a
//! spatial index would be pure overhead here.

use glam::Vec2;

use crate::consts::ROCK_RADIUS;
use crate::heading_vec;
use crate::sim::rock::Rock;

/// Fraction of the closing speed preserved along the contact normal
pub const RESTITUTION: f32 = 0.9;

/// An attacker slower than this cannot initiate a collision
const CONTACT_MIN_SPEED: f32 = 1e-3;

/// Below this speed the post-collision heading is left unchanged
const HEADING_MIN_SPEED: f32 = 1e-4;

/// Detect and resolve every overlapping pair in the roster
///
/// For each ordered pair (i, j) with i moving and both in play: exchange an
/// impulse along the contact normal when closing, recompute speed and
/// heading from the resulting velocity vectors, and separate the pair
/// symmetrically by half the overlap each. Both rocks are flagged as having
/// contacted, and the struck rock is forced back into play so a stationary
/// rock can be knocked into motion.
pub fn resolve_collisions(rocks: &mut [Rock]) {
    let n = rocks.len();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if !rocks[i].in_play || rocks[i].velocity <= CONTACT_MIN_SPEED {
                break; // attacker stays slow for the whole inner loop
            }
            if !rocks[j].in_play {
                continue;
            }

            let delta = rocks[j].pos - rocks[i].pos;
            let dist = delta.length();
            if dist <= 0.0 || dist >= 2.0 * ROCK_RADIUS {
                continue;
            }
            let normal = delta / dist;

            let vi = heading_vec(rocks[i].angle) * rocks[i].velocity;
            let vj = heading_vec(rocks[j].angle) * rocks[j].velocity;
            let closing = (vi - vj).dot(normal);

            let (vi, vj) = if closing > 0.0 {
                // Equal masses: each rock gives up half the closing
                // component, scaled by restitution
                let impulse = normal * ((1.0 + RESTITUTION) * 0.5 * closing);
                (vi - impulse, vj + impulse)
            } else {
                (vi, vj)
            };

            apply_velocity(&mut rocks[i], vi);
            apply_velocity(&mut rocks[j], vj);

            // Symmetric positional correction: half the overlap each
            let half_overlap = (2.0 * ROCK_RADIUS - dist) * 0.5;
            rocks[i].pos -= normal * half_overlap;
            rocks[j].pos += normal * half_overlap;

            rocks[i].has_contacted = true;
            rocks[j].has_contacted = true;
            // A resting rock that gets struck is live again
            rocks[j].in_play = true;
        }
    }
}

/// Write a velocity vector back as scalar speed + heading
fn apply_velocity(rock: &mut Rock, vel: Vec2) {
    let speed = vel.length();
    rock.velocity = speed;
    if speed > HEADING_MIN_SPEED {
        rock.angle = vel.y.atan2(vel.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rock::Team;
    use glam::Vec2;

    fn rock_at(pos: Vec2, angle: f32, velocity: f32) -> Rock {
        let mut rock = Rock::parked(Team::Red, 0);
        rock.deliver(angle, velocity, 1.0, 1.0);
        rock.pos = pos;
        rock
    }

    #[test]
    fn head_on_hit_transfers_momentum_and_separates() {
        let mut rocks = vec![
            rock_at(Vec2::new(10.0, 0.0), 0.0, 1.0),
            rock_at(Vec2::new(10.0 + 1.5 * ROCK_RADIUS, 0.0), 0.0, 0.0),
        ];
        resolve_collisions(&mut rocks);

        // No residual overlap
        let dist = rocks[0].pos.distance(rocks[1].pos);
        assert!(dist >= 2.0 * ROCK_RADIUS - 1e-5);

        assert!(rocks[0].has_contacted && rocks[1].has_contacted);
        assert!(rocks[1].in_play);
        // Struck rock carries most of the speed forward
        assert!(rocks[1].velocity > rocks[0].velocity);
        assert!(rocks[1].angle.abs() < 1e-5);

        // Relative normal speed is reversed and scaled by restitution
        let vi = crate::heading_vec(rocks[0].angle) * rocks[0].velocity;
        let vj = crate::heading_vec(rocks[1].angle) * rocks[1].velocity;
        let rel_after = (vi - vj).x;
        assert!((rel_after + RESTITUTION * 1.0).abs() < 1e-4);
    }

    #[test]
    fn restitution_dissipates_kinetic_energy() {
        let mut rocks = vec![
            rock_at(Vec2::new(10.0, 0.0), 0.0, 1.2),
            rock_at(Vec2::new(10.0 + 1.8 * ROCK_RADIUS, 0.0), 0.0, 0.0),
        ];
        let ke_before: f32 = rocks.iter().map(|r| 0.5 * r.velocity * r.velocity).sum();
        resolve_collisions(&mut rocks);
        let ke_after: f32 = rocks.iter().map(|r| 0.5 * r.velocity * r.velocity).sum();

        // Head-on with a resting target: loss = (1 - e^2)/2 * KE_before
        let expected = ke_before * (1.0 - (1.0 - RESTITUTION * RESTITUTION) / 2.0);
        assert!(ke_after < ke_before);
        assert!((ke_after - expected).abs() < 1e-3);
    }

    #[test]
    fn separating_rocks_exchange_no_impulse() {
        let mut rocks = vec![
            rock_at(Vec2::new(10.0 + 1.5 * ROCK_RADIUS, 0.0), 0.0, 1.0),
            rock_at(Vec2::new(10.0, 0.0), 0.0, 0.0),
        ];
        // Attacker is ahead of the overlap and moving away; still separated
        // positionally, but velocities must be untouched.
        resolve_collisions(&mut rocks);
        assert!((rocks[0].velocity - 1.0).abs() < 1e-6);
        assert_eq!(rocks[1].velocity, 0.0);
        // Zero-speed target keeps its old heading
        assert_eq!(rocks[1].angle, 0.0);
    }

    #[test]
    fn glancing_hit_deflects_both_headings() {
        let offset = ROCK_RADIUS * 1.2;
        let mut rocks = vec![
            rock_at(Vec2::new(10.0, 0.0), 0.0, 1.0),
            rock_at(Vec2::new(10.0 + offset, offset), 0.0, 0.0),
        ];
        resolve_collisions(&mut rocks);
        // Struck rock departs along the contact normal (up and away)
        assert!(rocks[1].velocity > 0.0);
        assert!(rocks[1].angle > 0.0);
        // Shooter deflects the other way
        assert!(rocks[0].angle < 0.0);
    }

    #[test]
    fn out_of_play_rocks_are_ignored() {
        let mut rocks = vec![
            rock_at(Vec2::new(10.0, 0.0), 0.0, 1.0),
            rock_at(Vec2::new(10.0 + ROCK_RADIUS, 0.0), 0.0, 0.0),
        ];
        rocks[1].in_play = false;
        let pos_before = rocks[1].pos;
        resolve_collisions(&mut rocks);
        assert_eq!(rocks[1].pos, pos_before);
        assert!(!rocks[1].has_contacted);
    }

    #[test]
    fn three_rock_pileup_resolves_deterministically() {
        let make = || {
            vec![
                rock_at(Vec2::new(10.0, 0.0), 0.0, 1.5),
                rock_at(Vec2::new(10.0 + 1.4 * ROCK_RADIUS, 0.02), 0.0, 0.0),
                rock_at(Vec2::new(10.0 + 2.8 * ROCK_RADIUS, -0.02), 0.0, 0.0),
            ]
        };
        let mut a = make();
        let mut b = make();
        resolve_collisions(&mut a);
        resolve_collisions(&mut b);
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.pos, rb.pos);
            assert_eq!(ra.velocity, rb.velocity);
            assert_eq!(ra.angle, rb.angle);
        }
        assert!(a.iter().all(|r| r.has_contacted));
    }
}
