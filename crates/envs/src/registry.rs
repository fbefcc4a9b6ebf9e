//! Environment ids and the factory that builds environments from them.
//!
//! Ids follow the `Name-vN` convention. Each registered id carries an
//! [`EnvSpec`]; when the spec has a step limit the built environment is
//! wrapped in [`TimeLimit`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::info;

use crate::cartpole::{CartPole, CartPoleConfig};
use crate::env::{Env, RenderMode};
use crate::error::EnvError;
use crate::time_limit::TimeLimit;

/// Registration metadata for an environment id.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvSpec {
    pub id: String,
    /// Episodes are cut off after this many steps.
    pub max_episode_steps: Option<usize>,
    /// Average return at which the task counts as solved.
    pub reward_threshold: Option<f32>,
}

impl EnvSpec {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_episode_steps: None,
            reward_threshold: None,
        }
    }

    #[must_use]
    pub fn max_episode_steps(mut self, steps: usize) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn reward_threshold(mut self, threshold: f32) -> Self {
        self.reward_threshold = Some(threshold);
        self
    }
}

/// Builds the bare environment; the registry applies wrappers.
pub type EnvFactory = fn(RenderMode) -> Box<dyn Env + Send>;

struct Entry {
    spec: EnvSpec,
    factory: EnvFactory,
}

/// Map from id to spec and factory.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

fn cartpole(render_mode: RenderMode) -> Box<dyn Env + Send> {
    Box::new(CartPole::new(CartPoleConfig::default(), render_mode))
}

/// Split `Name-vN` into its name and version.
///
/// # Errors
///
/// [`EnvError::MalformedId`] when `id` does not have that shape.
pub fn parse_id(id: &str) -> Result<(&str, u32), EnvError> {
    let malformed = || EnvError::MalformedId(id.to_owned());
    let (name, version) = id.rsplit_once("-v").ok_or_else(malformed)?;
    if name.is_empty() || version.is_empty() || !version.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let version = version.parse().map_err(|_| malformed())?;
    Ok((name, version))
}

impl Registry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the bundled classic-control environments.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            EnvSpec::new("CartPole-v0")
                .max_episode_steps(200)
                .reward_threshold(195.0),
            cartpole,
        );
        registry.register(
            EnvSpec::new("CartPole-v1")
                .max_episode_steps(500)
                .reward_threshold(475.0),
            cartpole,
        );
        registry
    }

    /// Add or replace an id.
    ///
    /// # Panics
    ///
    /// Panics if the spec id is not of the form `Name-vN`.
    pub fn register(&mut self, spec: EnvSpec, factory: EnvFactory) {
        assert!(
            parse_id(&spec.id).is_ok(),
            "cannot register malformed id `{}`",
            spec.id
        );
        self.entries.insert(spec.id.clone(), Entry { spec, factory });
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Look up the spec for `id`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed id, an unknown name, or a known name with an
    /// unregistered version.
    pub fn spec(&self, id: &str) -> Result<&EnvSpec, EnvError> {
        self.entry(id).map(|e| &e.spec)
    }

    fn entry(&self, id: &str) -> Result<&Entry, EnvError> {
        let (name, version) = parse_id(id)?;
        if let Some(entry) = self.entries.get(id) {
            return Ok(entry);
        }
        let available: Vec<&str> = self
            .ids()
            .filter(|other| parse_id(other).is_ok_and(|(n, _)| n == name))
            .collect();
        if available.is_empty() {
            Err(EnvError::UnknownEnv(name.to_owned()))
        } else {
            Err(EnvError::VersionNotFound {
                name: name.to_owned(),
                version,
                available: available.join(", "),
            })
        }
    }

    /// Build the environment registered under `id`.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::spec`].
    pub fn make(&self, id: &str, render_mode: RenderMode) -> Result<Box<dyn Env + Send>, EnvError> {
        let entry = self.entry(id)?;
        let env = (entry.factory)(render_mode);
        info!(id, ?render_mode, "Created environment");
        Ok(match entry.spec.max_episode_steps {
            Some(limit) => Box::new(TimeLimit::new(env, entry.spec.clone(), limit)),
            None => env,
        })
    }
}

/// Build an environment from the default registry.
///
/// # Errors
///
/// Same as [`Registry::spec`].
pub fn make(id: &str, render_mode: RenderMode) -> Result<Box<dyn Env + Send>, EnvError> {
    static DEFAULT: OnceLock<Registry> = OnceLock::new();
    DEFAULT.get_or_init(Registry::with_defaults).make(id, render_mode)
}
