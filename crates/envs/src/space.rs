//! Action and observation spaces.

use std::fmt;

/// An action accepted by an environment.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Index into a [`Space::Discrete`] space.
    Discrete(usize),
    /// Point in a [`Space::Box`] space.
    Continuous(Vec<f32>),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Discrete(a) => write!(f, "{a}"),
            Action::Continuous(v) => write!(f, "{v:?}"),
        }
    }
}

/// Set of valid values.
#[derive(Clone, Debug, PartialEq)]
pub enum Space {
    /// `{0, 1, ..., n - 1}`
    Discrete { n: usize },
    /// Per-dimension closed interval `[low[i], high[i]]`.
    Box { low: Vec<f32>, high: Vec<f32> },
}

impl Space {
    /// Discrete space `{0, ..., n - 1}`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn discrete(n: usize) -> Self {
        let space = Space::Discrete { n };
        assert_sampleable(&space);
        space
    }

    /// Box space with the same bounds in every dimension.
    #[must_use]
    pub fn uniform_box(dims: usize, low: f32, high: f32) -> Self {
        Space::Box {
            low: vec![low; dims],
            high: vec![high; dims],
        }
    }

    /// Number of components in a sample of this space.
    #[must_use]
    pub fn dims(&self) -> usize {
        match self {
            Space::Discrete { .. } => 1,
            Space::Box { low, .. } => low.len(),
        }
    }

    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        match (self, action) {
            (Space::Discrete { n }, Action::Discrete(a)) => a < n,
            (Space::Box { low, high }, Action::Continuous(v)) => {
                v.len() == low.len()
                    && v
                        .iter()
                        .zip(low.iter().zip(high))
                        .all(|(x, (lo, hi))| x >= lo && x <= hi)
            }
            _ => false,
        }
    }

    /// Draw a uniformly random member of the space.
    ///
    /// Box dimensions with an infinite (or `f32::MAX`) bound on either side
    /// are sampled from a standard normal around the finite bound, or around
    /// zero when both are unbounded.
    ///
    /// # Panics
    ///
    /// Panics on an empty `Discrete { n: 0 }` space.
    #[must_use]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Action {
        match self {
            Space::Discrete { n } => Action::Discrete(rng.usize(..*n)),
            Space::Box { low, high } => Action::Continuous(
                low.iter()
                    .zip(high)
                    .map(|(&lo, &hi)| match (bounded(lo), bounded(hi)) {
                        (true, true) => lo + rng.f32() * (hi - lo),
                        (true, false) => lo + standard_normal(rng).abs(),
                        (false, true) => hi - standard_normal(rng).abs(),
                        (false, false) => standard_normal(rng),
                    })
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Discrete { n } => write!(f, "Discrete({n})"),
            Space::Box { low, .. } => write!(f, "Box({},)", low.len()),
        }
    }
}

fn assert_sampleable(space: &Space) {
    assert!(
        !matches!(space, Space::Discrete { n: 0 }),
        "Discrete space needs at least one element"
    );
}

fn bounded(x: f32) -> bool {
    x.is_finite() && x.abs() < f32::MAX
}

#[allow(clippy::cast_possible_truncation)]
fn standard_normal(rng: &mut fastrand::Rng) -> f32 {
    // Box-Muller; 1 - u keeps the log argument in (0, 1].
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    ((-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()) as f32
}

/// A [`Space`] paired with the generator used to sample it.
#[derive(Debug)]
pub struct ActionSpace {
    space: Space,
    rng: fastrand::Rng,
}

impl ActionSpace {
    /// Unseeded action space; samples differ from run to run.
    ///
    /// # Panics
    ///
    /// Panics if `space` is `Discrete { n: 0 }`, which has nothing to sample.
    #[must_use]
    pub fn new(space: Space) -> Self {
        assert_sampleable(&space);
        Self {
            space,
            rng: fastrand::Rng::new(),
        }
    }

    /// # Panics
    ///
    /// Same as [`ActionSpace::new`].
    #[must_use]
    pub fn with_seed(space: Space, seed: u64) -> Self {
        assert_sampleable(&space);
        Self {
            space,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        self.space.contains(action)
    }

    pub fn sample(&mut self) -> Action {
        self.space.sample(&mut self.rng)
    }
}
