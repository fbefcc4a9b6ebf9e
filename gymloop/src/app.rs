//! # gymloop Application Logic
//!
//! Builds the environment named in the [`Settings`], attaches a frame
//! recorder when one was requested, and hands both to the episode runner.
//! Diagnostics go through `tracing`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use envs::{Env, RenderMode};
use render::FrameRecorder;
use runtime::{EpisodeRunner, Pause, RunSummary};
use tracing::{info, warn};

use crate::cli::Settings;

/// Run the configured episodes, writing telemetry to `out`.
///
/// `out` receives observations and finish lines only. Environments built
/// from the registry draw `human` frames straight to the process stdout, so
/// callers that capture `out` should pick `rgb-array` or `none`.
///
/// # Errors
///
/// Returns any error produced while building the environment, creating the
/// frame directory, stepping the environment or writing to `out`.
pub fn run<P: Pause, W: Write>(
    settings: &Settings,
    pause: P,
    out: &mut W,
) -> Result<RunSummary> {
    let mut env = envs::make(&settings.env_id, settings.render_mode)
        .with_context(|| format!("failed to create environment `{}`", settings.env_id))?;

    if let Some(seed) = settings.seed {
        env.seed(seed);
        env.action_space_mut().seed(seed);
        info!(seed, "Seeded environment and action space");
    }

    let mut runner = EpisodeRunner::with_pause(settings.runner.clone(), pause);
    if let Some(root) = &settings.frames_dir {
        if settings.render_mode == RenderMode::RgbArray {
            let recorder = FrameRecorder::timestamped(root).with_context(|| {
                format!("failed to create frame directory under {}", root.display())
            })?;
            runner = runner.with_recorder(recorder);
        } else {
            warn!(
                mode = ?settings.render_mode,
                "Frames are only produced in rgb-array mode; not recording"
            );
        }
    }

    let summary = runner.run(&mut env, out)?;
    env.close();

    if let Some(recorder) = runner.recorder() {
        info!(
            frames = recorder.frames_written(),
            dir = %recorder.dir().display(),
            "Saved frames"
        );
    }
    Ok(summary)
}

/// Run against the real terminal with sleeping delays.
///
/// # Errors
///
/// See [`run`].
pub fn run_stdout(settings: &Settings) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(settings, runtime::ThreadPause, &mut out)
}
