use render::RenderError;
use thiserror::Error;

use crate::space::{Action, Space};

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("step() called before reset()")]
    StepBeforeReset,
    #[error("action {action} is not contained in {space}")]
    InvalidAction { action: Action, space: Space },
    #[error("malformed environment id `{0}`, expected `Name-vN`")]
    MalformedId(String),
    #[error("no environment named `{0}` is registered")]
    UnknownEnv(String),
    #[error("environment `{name}` has no version v{version}; registered: {available}")]
    VersionNotFound {
        name: String,
        version: u32,
        available: String,
    },
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
