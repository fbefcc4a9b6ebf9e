//! The episode loop.

use std::io::{self, Write};

use envs::{Env, EnvError, StepResult};
use render::{FrameRecorder, RenderError};
use thiserror::Error;
use tracing::{info, info_span, trace};

use crate::config::RunnerConfig;
use crate::pause::{Pause, ThreadPause};

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("failed to write telemetry: {0}")]
    Output(#[from] io::Error),
    #[error("failed to record frame: {0}")]
    Frame(#[from] RenderError),
}

/// How an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// The environment reported `done` on this (1-based) step.
    Terminated { steps: usize },
    /// The step cap ran out first.
    StepCapReached,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeReport {
    /// 1-based episode number
    pub episode: usize,
    pub steps: usize,
    pub total_reward: f32,
    pub outcome: EpisodeOutcome,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub episodes: Vec<EpisodeReport>,
}

impl RunSummary {
    /// Episodes that ended because the environment said so.
    #[must_use]
    pub fn terminated(&self) -> usize {
        self.episodes
            .iter()
            .filter(|e| matches!(e.outcome, EpisodeOutcome::Terminated { .. }))
            .count()
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.episodes.iter().map(|e| e.steps).sum()
    }

    /// Mean episode return, `0.0` when nothing ran.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_reward(&self) -> f32 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        self.episodes.iter().map(|e| e.total_reward).sum::<f32>() / self.episodes.len() as f32
    }
}

/// Runs episodes with random actions, printing telemetry to a writer.
pub struct EpisodeRunner<P = ThreadPause> {
    config: RunnerConfig,
    pause: P,
    recorder: Option<FrameRecorder>,
}

impl EpisodeRunner<ThreadPause> {
    /// Runner that sleeps the calling thread for its delays.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_pause(config, ThreadPause)
    }
}

impl<P: Pause> EpisodeRunner<P> {
    #[must_use]
    pub fn with_pause(config: RunnerConfig, pause: P) -> Self {
        Self {
            config,
            pause,
            recorder: None,
        }
    }

    /// Save every frame the environment returns from `render`.
    #[must_use]
    pub fn with_recorder(mut self, recorder: FrameRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    #[must_use]
    pub fn pauser(&self) -> &P {
        &self.pause
    }

    #[must_use]
    pub fn recorder(&self) -> Option<&FrameRecorder> {
        self.recorder.as_ref()
    }

    /// Run all configured episodes against `env`.
    ///
    /// Observations and the per-episode finish line go to `out`. The first
    /// error aborts the run.
    ///
    /// # Errors
    ///
    /// [`RunnerError`] from the environment, the writer or the frame
    /// recorder.
    pub fn run<E, W>(&mut self, env: &mut E, out: &mut W) -> Result<RunSummary, RunnerError>
    where
        E: Env + ?Sized,
        W: Write,
    {
        info!(
            episodes = self.config.episodes,
            max_steps = self.config.max_steps,
            "Starting episode loop"
        );
        let mut summary = RunSummary::default();
        for episode in 1..=self.config.episodes {
            let report = self.run_episode(episode, env, out)?;
            summary.episodes.push(report);
        }
        info!(
            terminated = summary.terminated(),
            total_steps = summary.total_steps(),
            mean_reward = summary.mean_reward(),
            "Episode loop finished"
        );
        Ok(summary)
    }

    fn run_episode<E, W>(
        &mut self,
        episode: usize,
        env: &mut E,
        out: &mut W,
    ) -> Result<EpisodeReport, RunnerError>
    where
        E: Env + ?Sized,
        W: Write,
    {
        let _span = info_span!("episode", episode).entered();
        let mut observation = env.reset()?;
        let mut report = EpisodeReport {
            episode,
            steps: 0,
            total_reward: 0.0,
            outcome: EpisodeOutcome::StepCapReached,
        };

        for t in 0..self.config.max_steps {
            if let Some(frame) = env.render()? {
                if let Some(recorder) = self.recorder.as_mut() {
                    recorder.record(episode, t + 1, &frame)?;
                }
            }
            writeln!(out, "{observation}")?;

            let action = env.sample_action();
            let StepResult {
                observation: next,
                reward,
                done,
                ..
            } = env.step(&action)?;
            trace!(step = t + 1, %action, reward, done, "Stepped");

            report.steps = t + 1;
            report.total_reward += reward;
            observation = next;
            self.pause.pause(self.config.step_delay());

            if done {
                writeln!(out, "Episode finished after {} timesteps", t + 1)?;
                report.outcome = EpisodeOutcome::Terminated { steps: t + 1 };
                self.pause.pause(self.config.done_pause());
                break;
            }
        }

        info!(
            steps = report.steps,
            total_reward = report.total_reward,
            outcome = ?report.outcome,
            "Episode complete"
        );
        Ok(report)
    }
}
