#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Episode Runtime
//!
//! Drives an [`envs::Env`] through a fixed number of episodes with randomly
//! sampled actions.
//!
//! Each episode resets the environment and then steps it until either the
//! environment reports `done` or the step cap is reached. Every step renders
//! the environment, prints the current observation, samples an action from
//! the action space and applies it, then waits a short delay so rendering
//! stays watchable. When an episode terminates the runner prints
//! `Episode finished after N timesteps` and pauses before the next reset.
//!
//! Waiting goes through the [`Pause`] trait so tests can run the loop without
//! sleeping.

pub mod config;
pub mod pause;
pub mod runner;

pub use config::RunnerConfig;
pub use pause::{Pause, ThreadPause};
pub use runner::{EpisodeOutcome, EpisodeReport, EpisodeRunner, RunSummary, RunnerError};
