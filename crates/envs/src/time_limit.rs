//! Episode step limit wrapper.

use render::Frame;
use tracing::debug;

use crate::env::{Env, Observation, StepResult};
use crate::error::EnvError;
use crate::registry::EnvSpec;
use crate::space::{Action, ActionSpace, Space};

/// Info key set on the step at which the limit is hit.
pub const TRUNCATED_KEY: &str = "TimeLimit.truncated";

/// Ends every episode after `max_episode_steps` steps.
///
/// On the step that reaches the limit `done` is forced to `true` and the info
/// map gets [`TRUNCATED_KEY`], which is `true` only when the inner
/// environment had not terminated on its own.
pub struct TimeLimit<E> {
    inner: E,
    spec: EnvSpec,
    max_episode_steps: usize,
    elapsed: usize,
}

impl<E: Env> TimeLimit<E> {
    #[must_use]
    pub fn new(inner: E, spec: EnvSpec, max_episode_steps: usize) -> Self {
        Self {
            inner,
            spec,
            max_episode_steps,
            elapsed: 0,
        }
    }

    #[must_use]
    pub fn elapsed_steps(&self) -> usize {
        self.elapsed
    }

    #[must_use]
    pub fn inner(&self) -> &E {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Env> Env for TimeLimit<E> {
    fn spec(&self) -> Option<&EnvSpec> {
        Some(&self.spec)
    }

    fn observation_space(&self) -> &Space {
        self.inner.observation_space()
    }

    fn action_space(&self) -> &ActionSpace {
        self.inner.action_space()
    }

    fn action_space_mut(&mut self) -> &mut ActionSpace {
        self.inner.action_space_mut()
    }

    fn seed(&mut self, seed: u64) {
        self.inner.seed(seed);
    }

    fn reset(&mut self) -> Result<Observation, EnvError> {
        self.elapsed = 0;
        self.inner.reset()
    }

    fn step(&mut self, action: &Action) -> Result<StepResult, EnvError> {
        let mut result = self.inner.step(action)?;
        self.elapsed += 1;
        if self.elapsed >= self.max_episode_steps {
            debug!(
                id = %self.spec.id,
                steps = self.elapsed,
                "Episode reached its step limit"
            );
            result.info.insert(TRUNCATED_KEY, !result.done);
            result.done = true;
        }
        Ok(result)
    }

    fn render(&mut self) -> Result<Option<Frame>, EnvError> {
        self.inner.render()
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
