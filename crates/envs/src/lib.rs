#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Environments
//!
//! Reinforcement learning environments behind a single object-safe trait.
//!
//! Inspired by classic frameworks like OpenAI Gym, every environment exposes
//! the same small capability set through [`Env`]:
//!
//! -   [`Env::reset`] starts a new episode and returns the first observation.
//! -   [`Env::step`] applies an action and returns a [`StepResult`].
//! -   [`Env::render`] draws the current state according to the
//!     [`RenderMode`] the environment was created with.
//! -   [`Env::action_space_mut`] gives access to the [`ActionSpace`], whose
//!     `sample` method draws a random valid action.
//!
//! Environments are usually created by id through the [`Registry`], which
//! also applies the registered episode step limit with [`TimeLimit`]:
//!
//! ```rust,ignore
//! use envs::{make, Env, RenderMode};
//!
//! let mut env = make("CartPole-v0", RenderMode::None)?;
//! let obs = env.reset()?;
//! let action = env.sample_action();
//! let step = env.step(&action)?;
//! ```

pub mod cartpole;
pub mod env;
pub mod error;
pub mod registry;
pub mod space;
pub mod time_limit;

pub use cartpole::{CartPole, CartPoleConfig, Integrator};
pub use env::{Env, Info, InfoValue, Observation, RenderMode, StepResult};
pub use error::EnvError;
pub use registry::{make, EnvSpec, Registry};
pub use render::Frame;
pub use space::{Action, ActionSpace, Space};
pub use time_limit::TimeLimit;
