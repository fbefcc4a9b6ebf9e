//! Reinforcement learning environment trait and the values it exchanges.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

use render::Frame;

use crate::error::EnvError;
use crate::registry::EnvSpec;
use crate::space::{Action, ActionSpace, Space};

/// Flat observation vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observation(pub Vec<f32>);

impl Deref for Observation {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for Observation {
    fn from(v: Vec<f32>) -> Self {
        Self(v)
    }
}

impl From<[f32; 4]> for Observation {
    fn from(v: [f32; 4]) -> Self {
        Self(v.to_vec())
    }
}

/// Prints as a bracketed row with a sign column, e.g.
/// `[ 0.01234567 -0.04321000]`.
impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if v.is_sign_positive() {
                f.write_str(" ")?;
            }
            write!(f, "{v:.8}")?;
        }
        f.write_str("]")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InfoValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for InfoValue {
    fn from(v: bool) -> Self {
        InfoValue::Bool(v)
    }
}

impl From<i64> for InfoValue {
    fn from(v: i64) -> Self {
        InfoValue::Int(v)
    }
}

impl From<f64> for InfoValue {
    fn from(v: f64) -> Self {
        InfoValue::Float(v)
    }
}

impl From<&str> for InfoValue {
    fn from(v: &str) -> Self {
        InfoValue::Text(v.to_owned())
    }
}

/// Auxiliary diagnostics attached to a step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Info(BTreeMap<String, InfoValue>);

impl Info {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InfoValue>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Outcome of a single [`Env::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: Info,
}

/// How [`Env::render`] presents a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Rendering disabled; `render` yields nothing.
    #[default]
    None,
    /// Draw to the terminal as a side effect.
    Human,
    /// Return an RGB frame to the caller.
    RgbArray,
}

/// Core environment interface.
///
/// The trait is object safe so environments built by the registry can be
/// handed around as `Box<dyn Env>`.
pub trait Env {
    /// Registration metadata, when the environment was built from an id.
    fn spec(&self) -> Option<&EnvSpec> {
        None
    }

    /// Registered id such as `CartPole-v0`, when built from the registry.
    fn id(&self) -> Option<&str> {
        self.spec().map(|spec| spec.id.as_str())
    }

    fn observation_space(&self) -> &Space;

    fn action_space(&self) -> &ActionSpace;

    fn action_space_mut(&mut self) -> &mut ActionSpace;

    /// Random valid action from the action space.
    fn sample_action(&mut self) -> Action {
        self.action_space_mut().sample()
    }

    /// Reseed the environment's own generator. Reseeding the action space is
    /// left to the caller.
    fn seed(&mut self, seed: u64);

    /// Start a new episode and return its first observation.
    ///
    /// # Errors
    ///
    /// Implementation specific; the bundled environments never fail here.
    fn reset(&mut self) -> Result<Observation, EnvError>;

    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidAction`] for an action outside the action space and
    /// [`EnvError::StepBeforeReset`] before the first `reset`.
    fn step(&mut self, action: &Action) -> Result<StepResult, EnvError>;

    /// Render the current state according to the render mode.
    ///
    /// Returns a frame only in [`RenderMode::RgbArray`].
    ///
    /// # Errors
    ///
    /// [`EnvError::Render`] when human output cannot be written.
    fn render(&mut self) -> Result<Option<Frame>, EnvError>;

    /// Release resources held by the environment.
    fn close(&mut self) {}
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn spec(&self) -> Option<&EnvSpec> {
        (**self).spec()
    }

    fn observation_space(&self) -> &Space {
        (**self).observation_space()
    }

    fn action_space(&self) -> &ActionSpace {
        (**self).action_space()
    }

    fn action_space_mut(&mut self) -> &mut ActionSpace {
        (**self).action_space_mut()
    }

    fn sample_action(&mut self) -> Action {
        (**self).sample_action()
    }

    fn seed(&mut self, seed: u64) {
        (**self).seed(seed);
    }

    fn reset(&mut self) -> Result<Observation, EnvError> {
        (**self).reset()
    }

    fn step(&mut self, action: &Action) -> Result<StepResult, EnvError> {
        (**self).step(action)
    }

    fn render(&mut self) -> Result<Option<Frame>, EnvError> {
        (**self).render()
    }

    fn close(&mut self) {
        (**self).close();
    }
}
