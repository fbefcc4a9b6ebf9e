//! Command line flags and the optional JSON run file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use envs::RenderMode;
use runtime::RunnerConfig;
use serde::Deserialize;

pub const DEFAULT_ENV: &str = "CartPole-v0";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderArg {
    /// Draw frames in the terminal
    Human,
    /// Produce RGB frames (saved with --frames-dir)
    RgbArray,
    /// Do not render
    None,
}

impl From<RenderArg> for RenderMode {
    fn from(arg: RenderArg) -> Self {
        match arg {
            RenderArg::Human => RenderMode::Human,
            RenderArg::RgbArray => RenderMode::RgbArray,
            RenderArg::None => RenderMode::None,
        }
    }
}

/// Run random-action episodes against an environment and print what it sees.
#[derive(Debug, Parser)]
#[command(name = "gymloop", version, about)]
pub struct Args {
    /// Environment id, e.g. CartPole-v1
    #[arg(long)]
    pub env: Option<String>,
    /// Number of episodes
    #[arg(long)]
    pub episodes: Option<usize>,
    /// Step cap per episode
    #[arg(long)]
    pub max_steps: Option<usize>,
    /// Delay after each step in milliseconds
    #[arg(long)]
    pub step_delay_ms: Option<u64>,
    /// Pause after a finished episode in milliseconds
    #[arg(long)]
    pub done_pause_ms: Option<u64>,
    /// Render mode
    #[arg(long, value_enum)]
    pub render: Option<RenderArg>,
    /// Save rendered frames under DIR/<timestamp>; implies rgb-array
    #[arg(long, value_name = "DIR")]
    pub frames_dir: Option<PathBuf>,
    /// Seed for the environment and its action space
    #[arg(long)]
    pub seed: Option<u64>,
    /// JSON file with any of the options above; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Contents of the `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub env: Option<String>,
    pub seed: Option<u64>,
    pub render: Option<RenderArg>,
    pub frames_dir: Option<PathBuf>,
    #[serde(flatten)]
    pub runner: RunnerConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Fully resolved options for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub env_id: String,
    pub render_mode: RenderMode,
    pub frames_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub runner: RunnerConfig,
}

impl Settings {
    /// Merge flags over the config file over defaults.
    pub fn resolve(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    #[must_use]
    pub fn merge(args: Args, file: FileConfig) -> Self {
        let mut runner = file.runner;
        if let Some(v) = args.episodes {
            runner.episodes = v;
        }
        if let Some(v) = args.max_steps {
            runner.max_steps = v;
        }
        if let Some(v) = args.step_delay_ms {
            runner.step_delay_ms = v;
        }
        if let Some(v) = args.done_pause_ms {
            runner.done_pause_ms = v;
        }

        let frames_dir = args.frames_dir.or(file.frames_dir);
        let render = args.render.or(file.render);
        let render_mode = match (render, &frames_dir) {
            (Some(r), _) => r.into(),
            (None, Some(_)) => RenderMode::RgbArray,
            (None, None) => RenderMode::Human,
        };

        Self {
            env_id: args
                .env
                .or(file.env)
                .unwrap_or_else(|| DEFAULT_ENV.to_owned()),
            render_mode,
            frames_dir,
            seed: args.seed.or(file.seed),
            runner,
        }
    }
}
