//! The droplet set - in-flight problems falling toward the floor
//!
//! Droplets are value-like: each tick consumes the set and returns the
//! replacement, so nothing holds references into it. Insertion order is
//! spawn order (new droplets append), and every matcher walks the set in
//! that order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::problem::Problem;
use crate::consts::*;

/// One falling problem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    /// Unique within a session, monotonically increasing
    pub id: u32,
    pub problem: Problem,
    /// Field position in percent: x fixed at spawn, y falling
    pub pos: Vec2,
    /// Fall speed (percent of field height per second)
    pub speed: f32,
    /// Clock reading at spawn, for the answer-latency bonus
    pub created_at: f64,
}

impl Droplet {
    /// Spawn a droplet just above the field at a random column.
    ///
    /// The caller enforces the max-concurrent-droplets cap; this
    /// constructor never rejects.
    pub fn spawn<R: Rng>(
        id: u32,
        rng: &mut R,
        fixed_operand: Option<u8>,
        speed: f32,
        now_ms: f64,
    ) -> Self {
        let problem = Problem::generate(rng, fixed_operand);
        let x = rng.random_range(SPAWN_X_MIN..SPAWN_X_MAX);
        Self {
            id,
            problem,
            pos: Vec2::new(x, SPAWN_Y),
            speed,
            created_at: now_ms,
        }
    }

    /// Has this droplet hit the floor?
    pub fn is_dropped(&self) -> bool {
        self.pos.y >= FLOOR_Y
    }
}

/// Advance every droplet by the elapsed time. Pure and total; y never
/// decreases because speeds are non-negative.
pub fn advance(droplets: Vec<Droplet>, delta_ms: f64) -> Vec<Droplet> {
    let dy = (delta_ms / 1000.0) as f32 * 100.0;
    droplets
        .into_iter()
        .map(|d| Droplet {
            pos: Vec2::new(d.pos.x, d.pos.y + d.speed * dy),
            ..d
        })
        .collect()
}

/// Split the set at the floor. Both halves keep input order. This is the
/// sole mechanism for life loss.
pub fn partition_dropped(droplets: Vec<Droplet>) -> (Vec<Droplet>, Vec<Droplet>) {
    droplets.into_iter().partition(|d| !d.is_dropped())
}

/// Remove and return the first droplet (oldest spawn order) whose answer
/// equals the submission.
///
/// With duplicate products (2×6 and 3×4 both equal 12) several droplets
/// can satisfy one input; exactly one resolves per submission.
pub fn take_match(droplets: &mut Vec<Droplet>, answer: u32) -> Option<Droplet> {
    let idx = droplets.iter().position(|d| d.problem.answer() == answer)?;
    Some(droplets.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn droplet(id: u32, a: u8, b: u8, y: f32) -> Droplet {
        Droplet {
            id,
            problem: Problem::new(a, b),
            pos: Vec2::new(50.0, y),
            speed: 0.5,
            created_at: 0.0,
        }
    }

    #[test]
    fn test_spawn_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..100 {
            let d = Droplet::spawn(id, &mut rng, Some(4), 0.5, 1000.0);
            assert!(d.pos.x >= SPAWN_X_MIN && d.pos.x < SPAWN_X_MAX);
            assert_eq!(d.pos.y, SPAWN_Y);
            assert_eq!(d.problem.multiplier_a, 4);
        }
    }

    #[test]
    fn test_advance_formula() {
        // speed 0.5 over one second moves y by 0.5 * 100 = 50
        let set = vec![droplet(0, 2, 3, 0.0)];
        let set = advance(set, 1000.0);
        assert!((set[0].pos.y - 50.0).abs() < 1e-4);
        // x never moves
        assert_eq!(set[0].pos.x, 50.0);
    }

    #[test]
    fn test_partition_preserves_order() {
        let set = vec![
            droplet(0, 2, 3, 100.0),
            droplet(1, 2, 4, 50.0),
            droplet(2, 2, 5, 120.0),
            droplet(3, 2, 6, 99.9),
        ];
        let (remaining, dropped) = partition_dropped(set);
        assert_eq!(
            remaining.iter().map(|d| d.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(dropped.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_take_match_oldest_first() {
        // 2×6 and 3×4 both answer 12; the earlier spawn wins
        let mut set = vec![droplet(0, 2, 6, 10.0), droplet(1, 3, 4, 20.0)];
        let hit = take_match(&mut set, 12).unwrap();
        assert_eq!(hit.id, 0);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].id, 1);
    }

    #[test]
    fn test_take_match_miss() {
        let mut set = vec![droplet(0, 2, 6, 10.0)];
        assert!(take_match(&mut set, 13).is_none());
        assert_eq!(set.len(), 1);
    }
}
