//! Classic cart-pole balancing task.
//!
//! A pole is attached by an unactuated joint to a cart moving along a
//! frictionless track. The agent pushes the cart left or right with a fixed
//! force; the episode ends when the pole leans more than 12 degrees from
//! vertical or the cart leaves the track.
//!
//! Observation: `[cart_x, cart_velocity, pole_angle, pole_angular_velocity]`
//! Action: `0` pushes left, `1` pushes right.

use std::io::{self, Write};

use glam::Vec2;
use render::{rasterize, Color, Frame, RenderError, Scene, Shape, TextCanvas};
use tracing::{debug, warn};

use crate::env::{Env, Info, Observation, RenderMode, StepResult};
use crate::error::EnvError;
use crate::space::{Action, ActionSpace, Space};

const SCREEN_WIDTH: u32 = 600;
const SCREEN_HEIGHT: u32 = 400;

/// How the state is advanced each step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Integrator {
    /// Positions use the velocities from before the update.
    #[default]
    Euler,
    /// Velocities are updated first and then used for positions.
    SemiImplicitEuler,
}

/// Physical constants and failure thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleConfig {
    pub gravity: f32,
    /// Cart mass in kg
    pub cart_mass: f32,
    /// Pole mass in kg
    pub pole_mass: f32,
    /// Half the pole length in meters
    pub half_length: f32,
    /// Magnitude of the push applied by either action
    pub force_mag: f32,
    /// Seconds between state updates
    pub tau: f32,
    pub integrator: Integrator,
    /// Pole angle (radians) beyond which the episode fails
    pub theta_threshold: f32,
    /// Cart position (meters) beyond which the episode fails
    pub x_threshold: f32,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            half_length: 0.5,
            force_mag: 10.0,
            tau: 0.02,
            integrator: Integrator::Euler,
            theta_threshold: 12.0_f32.to_radians(),
            x_threshold: 2.4,
        }
    }
}

impl CartPoleConfig {
    fn total_mass(&self) -> f32 {
        self.cart_mass + self.pole_mass
    }

    fn pole_mass_length(&self) -> f32 {
        self.pole_mass * self.half_length
    }
}

/// The cart-pole environment.
pub struct CartPole {
    config: CartPoleConfig,
    /// `None` until the first reset.
    state: Option<[f32; 4]>,
    /// Steps taken since the episode ended; `None` while it is running.
    steps_beyond_done: Option<usize>,
    rng: fastrand::Rng,
    observation_space: Space,
    action_space: ActionSpace,
    render_mode: RenderMode,
    canvas: TextCanvas,
    human_out: Box<dyn Write + Send>,
    warned_no_render: bool,
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new(CartPoleConfig::default(), RenderMode::None)
    }
}

impl CartPole {
    /// In [`RenderMode::Human`] frames are written to the process stdout
    /// unless [`CartPole::with_human_output`] supplies another sink.
    #[must_use]
    pub fn new(config: CartPoleConfig, render_mode: RenderMode) -> Self {
        let high = vec![
            config.x_threshold * 2.0,
            f32::MAX,
            config.theta_threshold * 2.0,
            f32::MAX,
        ];
        let low = high.iter().map(|h| -h).collect();
        Self {
            config,
            state: None,
            steps_beyond_done: None,
            rng: fastrand::Rng::new(),
            observation_space: Space::Box { low, high },
            action_space: ActionSpace::new(Space::discrete(2)),
            render_mode,
            canvas: TextCanvas::default(),
            human_out: Box::new(io::stdout()),
            warned_no_render: false,
        }
    }

    /// Send `human` mode frames to `out` instead of stdout.
    #[must_use]
    pub fn with_human_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.human_out = out;
        self
    }

    #[must_use]
    pub fn config(&self) -> &CartPoleConfig {
        &self.config
    }

    /// Current `[x, x_dot, theta, theta_dot]`, if the env has been reset.
    #[must_use]
    pub fn state(&self) -> Option<[f32; 4]> {
        self.state
    }

    /// Overwrite the state, e.g. to start from a chosen configuration.
    pub fn set_state(&mut self, state: [f32; 4]) {
        self.state = Some(state);
        self.steps_beyond_done = None;
    }

    fn is_failed(&self, [x, _, theta, _]: [f32; 4]) -> bool {
        x < -self.config.x_threshold
            || x > self.config.x_threshold
            || theta < -self.config.theta_threshold
            || theta > self.config.theta_threshold
    }

    fn advance(&self, [x, x_dot, theta, theta_dot]: [f32; 4], push_right: bool) -> [f32; 4] {
        let c = &self.config;
        let force = if push_right { c.force_mag } else { -c.force_mag };
        let (sin_theta, cos_theta) = theta.sin_cos();

        let temp = (force + c.pole_mass_length() * theta_dot * theta_dot * sin_theta)
            / c.total_mass();
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp)
            / (c.half_length * (4.0 / 3.0 - c.pole_mass * cos_theta * cos_theta / c.total_mass()));
        let x_acc = temp - c.pole_mass_length() * theta_acc * cos_theta / c.total_mass();

        match c.integrator {
            Integrator::Euler => [
                x + c.tau * x_dot,
                x_dot + c.tau * x_acc,
                theta + c.tau * theta_dot,
                theta_dot + c.tau * theta_acc,
            ],
            Integrator::SemiImplicitEuler => {
                let x_dot = x_dot + c.tau * x_acc;
                let theta_dot = theta_dot + c.tau * theta_acc;
                [x + c.tau * x_dot, x_dot, theta + c.tau * theta_dot, theta_dot]
            }
        }
    }

    /// Scene for the current state, in a 600x400 pixel frame.
    ///
    /// Returns `None` before the first reset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scene(&self) -> Option<Scene> {
        let [x, _, theta, _] = self.state?;
        let width = SCREEN_WIDTH as f32;
        let world_width = self.config.x_threshold * 2.0;
        let scale = width / world_width;
        let cart_y = 100.0;
        let pole_width = 10.0;
        let pole_len = scale * (2.0 * self.config.half_length);
        let cart_half = Vec2::new(25.0, 15.0);

        let cart_x = x * scale + width / 2.0;
        let axle = Vec2::new(cart_x, cart_y + cart_half.y / 2.0);

        // Pole rectangle before rotation, anchored at the axle.
        let (l, r) = (-pole_width / 2.0, pole_width / 2.0);
        let (b, t) = (-pole_width / 2.0, pole_len - pole_width / 2.0);
        let rot = Vec2::from_angle(-theta);
        let corners = [
            Vec2::new(l, b),
            Vec2::new(l, t),
            Vec2::new(r, t),
            Vec2::new(r, b),
        ]
        .map(|c| axle + rot.rotate(c));

        let mut scene = Scene::new(width, SCREEN_HEIGHT as f32);
        scene
            .push(Shape::Line {
                from: Vec2::new(0.0, cart_y),
                to: Vec2::new(width, cart_y),
                color: Color::BLACK,
            })
            .push(Shape::Rect {
                center: Vec2::new(cart_x, cart_y),
                half_extents: cart_half,
                color: Color::BLACK,
            })
            .push(Shape::Quad {
                corners,
                color: Color::rgb(202, 152, 101),
            })
            .push(Shape::Circle {
                center: axle,
                radius: pole_width / 2.0,
                color: Color::rgb(129, 132, 203),
            });
        Some(scene)
    }
}

impl Env for CartPole {
    fn observation_space(&self) -> &Space {
        &self.observation_space
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn action_space_mut(&mut self) -> &mut ActionSpace {
        &mut self.action_space
    }

    fn seed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    fn reset(&mut self) -> Result<Observation, EnvError> {
        let state = [0; 4].map(|_| self.rng.f32() * 0.1 - 0.05);
        self.state = Some(state);
        self.steps_beyond_done = None;
        debug!(?state, "CartPole reset");
        Ok(state.into())
    }

    fn step(&mut self, action: &Action) -> Result<StepResult, EnvError> {
        let push_right = match action {
            Action::Discrete(a) if *a < 2 => *a == 1,
            _ => {
                return Err(EnvError::InvalidAction {
                    action: action.clone(),
                    space: self.action_space.space().clone(),
                })
            }
        };
        let state = self.state.ok_or(EnvError::StepBeforeReset)?;
        let next = self.advance(state, push_right);
        self.state = Some(next);

        let done = self.is_failed(next);
        let reward = if let Some(beyond) = self.steps_beyond_done.as_mut() {
            if *beyond == 0 {
                warn!(
                    "step() called after the episode ended; call reset() first, \
                     further steps yield zero reward"
                );
            }
            *beyond += 1;
            0.0
        } else {
            if done {
                // Pole just fell.
                self.steps_beyond_done = Some(0);
            }
            1.0
        };

        Ok(StepResult {
            observation: next.into(),
            reward,
            done,
            info: Info::new(),
        })
    }

    fn render(&mut self) -> Result<Option<Frame>, EnvError> {
        if self.render_mode == RenderMode::None {
            if !self.warned_no_render {
                warn!("render() called without a render mode; nothing will be drawn");
                self.warned_no_render = true;
            }
            return Ok(None);
        }
        let Some(scene) = self.scene() else {
            return Ok(None);
        };
        match self.render_mode {
            RenderMode::Human => {
                let text = self.canvas.draw(&scene);
                self.human_out
                    .write_all(text.as_bytes())
                    .and_then(|()| self.human_out.flush())
                    .map_err(RenderError::from)?;
                Ok(None)
            }
            RenderMode::RgbArray => Ok(Some(Frame::Rgb(rasterize(
                &scene,
                SCREEN_WIDTH,
                SCREEN_HEIGHT,
            )))),
            RenderMode::None => Ok(None),
        }
    }
}
