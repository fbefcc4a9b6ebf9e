//! # gymloop
//!
//! Runs a handful of episodes against a reinforcement learning environment
//! with uniformly random actions, rendering every frame and printing each
//! observation. It is the smallest possible end-to-end check that an
//! environment resets, steps, renders and terminates the way it should.
//!
//! ## The Crates
//!
//! -   **`gymloop`:** this crate. Parses flags, sets up logging and wires the
//!     other crates together.
//! -   **[`envs`]:** the [`envs::Env`] trait, spaces, the id registry and the
//!     CartPole environment.
//! -   **[`render`]:** software rendering of environment scenes to RGB images
//!     or terminal text, and PNG frame recording.
//! -   **[`runtime`]:** the episode loop itself.
//!
//! With no flags the binary behaves like the classic random-agent demo:
//! `CartPole-v0`, three episodes of at most 100 steps, a 10 ms delay per
//! step and a one second pause after each finished episode.

pub mod app;
pub mod cli;

pub use envs;
pub use render;
pub use runtime;
