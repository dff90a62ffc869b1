//! Directional proximity readings and their generator.

use crate::rng::RandomSource;
use crate::walk::BoundedWalk;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Front,
    Rear,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[
            Direction::Front,
            Direction::Rear,
            Direction::Left,
            Direction::Right,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Front => "front",
            Direction::Rear => "rear",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distances in meters. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityReading {
    pub front: f64,
    pub rear: f64,
    pub left: f64,
    pub right: f64,
}

impl ProximityReading {
    pub fn initial() -> Self {
        Self {
            front: 8.2,
            rear: 12.5,
            left: 5.7,
            right: 9.1,
        }
    }

    pub fn get(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Front => self.front,
            Direction::Rear => self.rear,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn get_mut(&mut self, direction: Direction) -> &mut f64 {
        match direction {
            Direction::Front => &mut self.front,
            Direction::Rear => &mut self.rear,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// The nearest obstacle and its distance.
    pub fn closest(&self) -> (Direction, f64) {
        Direction::all()
            .iter()
            .map(|&d| (d, self.get(d)))
            .fold((Direction::Front, self.front), |best, cur| {
                if cur.1 < best.1 {
                    cur
                } else {
                    best
                }
            })
    }

    /// Directions whose distance is strictly below `threshold`.
    pub fn within(&self, threshold: f64) -> Vec<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|&d| self.get(d) < threshold)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ProximityGenerator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct ProximityGenerator {
    walk: BoundedWalk,
}

impl ProximityGenerator {
    pub fn new(floor: f64, max_step: f64) -> Self {
        Self {
            walk: BoundedWalk::floored(floor, max_step),
        }
    }

    /// Walk each direction once, in front/rear/left/right order.
    pub fn advance(&self, reading: &mut ProximityReading, rng: &mut dyn RandomSource) {
        for &direction in Direction::all() {
            let slot = reading.get_mut(direction);
            *slot = self.walk.advance(*slot, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    #[test]
    fn zero_step_keeps_initial_values() {
        let generator = ProximityGenerator::new(0.0, 1.0);
        let mut reading = ProximityReading::initial();
        let mut rng = ScriptedRandom::constant(0.5).unwrap();
        generator.advance(&mut reading, &mut rng);
        assert_eq!(reading, ProximityReading::initial());
    }

    #[test]
    fn draws_map_to_directions_in_order() {
        let generator = ProximityGenerator::new(0.0, 1.0);
        let mut reading = ProximityReading::initial();
        // steps: front +0.5, rear -0.5, left 0, right -1
        let mut rng = ScriptedRandom::new(vec![0.75, 0.25, 0.5, 0.0]).unwrap();
        generator.advance(&mut reading, &mut rng);
        assert!((reading.front - 8.7).abs() < 1e-9);
        assert!((reading.rear - 12.0).abs() < 1e-9);
        assert!((reading.left - 5.7).abs() < 1e-9);
        assert!((reading.right - 8.1).abs() < 1e-9);
    }

    #[test]
    fn never_goes_negative() {
        let generator = ProximityGenerator::new(0.0, 1.0);
        let mut reading = ProximityReading {
            front: 0.3,
            rear: 0.0,
            left: 1.0,
            right: 2.0,
        };
        let mut rng = ScriptedRandom::constant(0.0).unwrap();
        for _ in 0..10 {
            generator.advance(&mut reading, &mut rng);
            for &d in Direction::all() {
                assert!(reading.get(d) >= 0.0);
            }
        }
        assert_eq!(reading.within(0.1).len(), 4);
    }

    #[test]
    fn closest_and_within() {
        let reading = ProximityReading::initial();
        assert_eq!(reading.closest(), (Direction::Left, 5.7));
        assert_eq!(reading.within(6.0), vec![Direction::Left]);
        assert!(reading.within(5.0).is_empty());
    }
}
