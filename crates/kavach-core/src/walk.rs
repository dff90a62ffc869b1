use crate::rng::RandomSource;

/// Bounded random walk: `next = clamp(prev + step, floor, ceiling)` with
/// `step` uniform in `[-max_step, +max_step)`. A `None` ceiling leaves the
/// walk unbounded above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedWalk {
    pub floor: f64,
    pub ceiling: Option<f64>,
    pub max_step: f64,
}

impl BoundedWalk {
    pub fn floored(floor: f64, max_step: f64) -> Self {
        Self {
            floor,
            ceiling: None,
            max_step,
        }
    }

    pub fn clamped(floor: f64, ceiling: f64, max_step: f64) -> Self {
        Self {
            floor,
            ceiling: Some(ceiling),
            max_step,
        }
    }

    pub fn apply(&self, value: f64, step: f64) -> f64 {
        let next = (value + step).max(self.floor);
        match self.ceiling {
            Some(ceiling) => next.min(ceiling),
            None => next,
        }
    }

    /// Draw one step from `rng` and apply it.
    pub fn advance(&self, value: f64, rng: &mut dyn RandomSource) -> f64 {
        let step = rng.signed_step(self.max_step);
        self.apply(value, step)
    }
}
