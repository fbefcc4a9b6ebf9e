mod common;

use std::time::Duration;

use common::{lines, Call, RecordingPause, ScriptedEnv};
use envs::{Env, EnvError, RenderMode};
use runtime::{EpisodeOutcome, EpisodeRunner, RunnerConfig, RunnerError};

const STEP_DELAY: Duration = Duration::from_millis(10);
const DONE_PAUSE: Duration = Duration::from_secs(1);

fn runner(episodes: usize) -> EpisodeRunner<RecordingPause> {
    EpisodeRunner::with_pause(
        RunnerConfig {
            episodes,
            ..RunnerConfig::default()
        },
        RecordingPause::default(),
    )
}

#[test]
fn reset_precedes_every_episode() {
    let mut env = ScriptedEnv::new(vec![Some(2), Some(1), Some(3)]);
    let mut out = Vec::new();
    runner(3).run(&mut env, &mut out).unwrap();

    let expected = [
        Call::Reset,
        Call::Render, Call::Sample, Call::Step,
        Call::Render, Call::Sample, Call::Step,
        Call::Reset,
        Call::Render, Call::Sample, Call::Step,
        Call::Reset,
        Call::Render, Call::Sample, Call::Step,
        Call::Render, Call::Sample, Call::Step,
        Call::Render, Call::Sample, Call::Step,
    ];
    assert_eq!(env.calls(), expected);
}

#[test]
fn done_on_fifth_step() {
    let mut env = ScriptedEnv::new(vec![Some(5)]);
    let mut out = Vec::new();
    let mut runner = runner(1);
    let summary = runner.run(&mut env, &mut out).unwrap();

    assert_eq!(env.count(Call::Step), 5);
    let lines = lines(&out);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "[ 0.00000000  0.00000000]");
    assert_eq!(lines[4], "[ 0.00000000  4.00000000]");
    assert_eq!(lines[5], "Episode finished after 5 timesteps");

    let mut expected = vec![STEP_DELAY; 5];
    expected.push(DONE_PAUSE);
    assert_eq!(runner.pauser().pauses, expected);

    let report = &summary.episodes[0];
    assert_eq!(report.steps, 5);
    assert_eq!(report.outcome, EpisodeOutcome::Terminated { steps: 5 });
    assert!((report.total_reward - 5.0).abs() < f32::EPSILON);
}

#[test]
fn never_done_runs_to_the_cap_silently() {
    let mut env = ScriptedEnv::new(vec![None]);
    let mut out = Vec::new();
    let mut runner = runner(1);
    let summary = runner.run(&mut env, &mut out).unwrap();

    assert_eq!(env.count(Call::Step), 100);
    let lines = lines(&out);
    assert_eq!(lines.len(), 100);
    assert!(lines.iter().all(|l| !l.starts_with("Episode finished")));
    assert_eq!(runner.pauser().pauses, vec![STEP_DELAY; 100]);
    assert_eq!(summary.episodes[0].outcome, EpisodeOutcome::StepCapReached);
}

#[test]
fn three_episodes_mixed_outcomes() {
    let mut env = ScriptedEnv::new(vec![Some(5), None, Some(1)]);
    let mut out = Vec::new();
    let mut runner = runner(3);
    let summary = runner.run(&mut env, &mut out).unwrap();

    assert_eq!(env.count(Call::Reset), 3);
    assert_eq!(env.count(Call::Step), 5 + 100 + 1);

    let finished: Vec<String> = lines(&out)
        .into_iter()
        .filter(|l| l.starts_with("Episode finished"))
        .collect();
    assert_eq!(
        finished,
        [
            "Episode finished after 5 timesteps",
            "Episode finished after 1 timesteps"
        ]
    );

    let pauses = &runner.pauser().pauses;
    assert_eq!(pauses.iter().filter(|p| **p == DONE_PAUSE).count(), 2);
    // the capped episode goes straight to the next reset
    assert_eq!(pauses[5], DONE_PAUSE);
    assert_eq!(pauses[106], STEP_DELAY);
    assert_eq!(pauses[107], DONE_PAUSE);
    assert_eq!(pauses.len(), 108);

    assert_eq!(summary.terminated(), 2);
    assert_eq!(summary.total_steps(), 106);
    let numbers: Vec<usize> = summary.episodes.iter().map(|e| e.episode).collect();
    assert_eq!(numbers, [1, 2, 3]);
}

#[test]
fn done_pause_comes_before_the_next_reset() {
    let mut env = ScriptedEnv::new(vec![Some(2), None, Some(1)]);
    let mut runner = EpisodeRunner::with_pause(
        RunnerConfig {
            episodes: 3,
            max_steps: 3,
            ..RunnerConfig::default()
        },
        RecordingPause::logging_to(env.log()),
    );
    runner.run(&mut env, &mut Vec::<u8>::new()).unwrap();

    let step = [Call::Render, Call::Sample, Call::Step, Call::Pause(STEP_DELAY)];
    let mut expected = vec![Call::Reset];
    // terminates on step 2
    expected.extend(step.repeat(2));
    expected.push(Call::Pause(DONE_PAUSE));
    // capped at 3 steps, straight to the next reset
    expected.push(Call::Reset);
    expected.extend(step.repeat(3));
    // terminates on step 1
    expected.push(Call::Reset);
    expected.extend(step);
    expected.push(Call::Pause(DONE_PAUSE));

    assert_eq!(env.events(), expected);
}

#[test]
fn step_cap_is_configurable() {
    let mut env = ScriptedEnv::new(vec![Some(50), None]);
    let mut out = Vec::new();
    let mut runner = EpisodeRunner::with_pause(
        RunnerConfig {
            episodes: 2,
            max_steps: 10,
            step_delay_ms: 0,
            done_pause_ms: 0,
        },
        RecordingPause::default(),
    );
    let summary = runner.run(&mut env, &mut out).unwrap();
    assert_eq!(env.count(Call::Step), 20);
    assert_eq!(summary.terminated(), 0);
    assert!(runner.pauser().pauses.iter().all(Duration::is_zero));
}

#[test]
fn zero_episodes_touch_nothing() {
    let mut env = ScriptedEnv::new(vec![]);
    let mut out = Vec::new();
    let summary = runner(0).run(&mut env, &mut out).unwrap();
    assert!(env.events().is_empty());
    assert!(out.is_empty());
    assert!(summary.mean_reward().abs() < f32::EPSILON);
}

#[test]
fn environment_errors_abort_the_run() {
    let mut env = ScriptedEnv::new(vec![None, None]);
    env.fail_render_at = Some(3);
    let mut out = Vec::new();
    let err = runner(2).run(&mut env, &mut out).unwrap_err();
    assert!(matches!(err, RunnerError::Env(EnvError::Render(_))));
    assert_eq!(env.count(Call::Step), 2);
    assert_eq!(env.count(Call::Reset), 1);
    assert_eq!(lines(&out).len(), 2);
}

#[test]
fn frames_go_to_the_recorder() {
    let dir = std::env::temp_dir().join(format!("runtime-frames-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut env = ScriptedEnv::new(vec![Some(3), Some(2)]);
    env.frames = true;
    let mut out = Vec::new();
    let mut runner = runner(2).with_recorder(render::FrameRecorder::create(&dir).unwrap());
    runner.run(&mut env, &mut out).unwrap();

    assert_eq!(runner.recorder().unwrap().frames_written(), 5);
    assert!(dir.join("ep001_step0003.txt").is_file());
    assert!(dir.join("ep002_step0002.txt").is_file());
    assert!(!dir.join("ep002_step0003.txt").exists());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn runs_registered_cartpole() {
    let mut env = envs::make("CartPole-v0", RenderMode::None).unwrap();
    env.seed(7);
    env.action_space_mut().seed(7);
    let mut out = Vec::new();
    let mut runner = runner(3);
    let summary = runner.run(&mut env, &mut out).unwrap();

    assert_eq!(summary.episodes.len(), 3);
    for report in &summary.episodes {
        assert!(report.steps >= 1 && report.steps <= 100);
        if let EpisodeOutcome::Terminated { steps } = report.outcome {
            assert_eq!(steps, report.steps);
        }
        // CartPole pays 1.0 per step while the episode is live
        assert!((report.total_reward - report.steps as f32).abs() < f32::EPSILON);
    }
    let printed = lines(&out);
    let finished = printed
        .iter()
        .filter(|l| l.starts_with("Episode finished"))
        .count();
    assert_eq!(finished, summary.terminated());
    assert_eq!(printed.len(), summary.total_steps() + finished);
}
