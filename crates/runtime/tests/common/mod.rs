#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use envs::{
    Action, ActionSpace, Env, EnvError, Frame, Info, Observation, Space, StepResult,
};
use render::RenderError;
use runtime::Pause;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    Reset,
    Render,
    Sample,
    Step,
    Pause(Duration),
}

/// Env calls and pauses in the order they happened.
pub type EventLog = Rc<RefCell<Vec<Call>>>;

/// Environment whose episodes end at scripted steps.
///
/// `done_at[i]` is the 1-based step at which episode `i` reports `done`, or
/// `None` for an episode that never ends on its own. Observations are
/// `[episode, step]`.
pub struct ScriptedEnv {
    pub done_at: Vec<Option<usize>>,
    log: EventLog,
    pub frames: bool,
    pub fail_render_at: Option<usize>,
    episode: Option<usize>,
    step: usize,
    observation_space: Space,
    action_space: ActionSpace,
}

impl ScriptedEnv {
    pub fn new(done_at: Vec<Option<usize>>) -> Self {
        Self {
            done_at,
            log: EventLog::default(),
            frames: false,
            fail_render_at: None,
            episode: None,
            step: 0,
            observation_space: Space::uniform_box(2, 0.0, 1000.0),
            action_space: ActionSpace::with_seed(Space::Discrete { n: 2 }, 0),
        }
    }

    /// Handle for a [`RecordingPause`] to log into.
    pub fn log(&self) -> EventLog {
        Rc::clone(&self.log)
    }

    /// Everything logged so far, pauses included.
    pub fn events(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    /// Env calls only.
    pub fn calls(&self) -> Vec<Call> {
        self.events()
            .into_iter()
            .filter(|c| !matches!(c, Call::Pause(_)))
            .collect()
    }

    pub fn count(&self, call: Call) -> usize {
        self.log.borrow().iter().filter(|c| **c == call).count()
    }

    fn push(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }

    #[allow(clippy::cast_precision_loss)]
    fn observation(&self) -> Observation {
        Observation(vec![self.episode.unwrap_or(0) as f32, self.step as f32])
    }
}

impl Env for ScriptedEnv {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn action_space_mut(&mut self) -> &mut ActionSpace {
        &mut self.action_space
    }

    fn sample_action(&mut self) -> Action {
        self.push(Call::Sample);
        self.action_space.sample()
    }

    fn seed(&mut self, _seed: u64) {}

    fn reset(&mut self) -> Result<Observation, EnvError> {
        self.push(Call::Reset);
        self.episode = Some(self.episode.map_or(0, |e| e + 1));
        self.step = 0;
        Ok(self.observation())
    }

    fn step(&mut self, action: &Action) -> Result<StepResult, EnvError> {
        self.push(Call::Step);
        let episode = self.episode.ok_or(EnvError::StepBeforeReset)?;
        assert!(self.action_space.contains(action));
        self.step += 1;
        let done = self.done_at.get(episode).copied().flatten() == Some(self.step);
        Ok(StepResult {
            observation: self.observation(),
            reward: 1.0,
            done,
            info: Info::new(),
        })
    }

    fn render(&mut self) -> Result<Option<Frame>, EnvError> {
        self.push(Call::Render);
        if self.fail_render_at == Some(self.step + 1) {
            let err = std::io::Error::new(std::io::ErrorKind::Other, "display gone");
            return Err(RenderError::Io(err).into());
        }
        Ok(self
            .frames
            .then(|| Frame::Text(format!("frame {}\n", self.step))))
    }
}

/// Records pauses instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingPause {
    pub pauses: Vec<Duration>,
    log: Option<EventLog>,
}

impl RecordingPause {
    /// Also append each pause to a [`ScriptedEnv`]'s log.
    pub fn logging_to(log: EventLog) -> Self {
        Self {
            pauses: Vec::new(),
            log: Some(log),
        }
    }
}

impl Pause for RecordingPause {
    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
        if let Some(log) = &self.log {
            log.borrow_mut().push(Call::Pause(duration));
        }
    }
}

pub fn lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}
