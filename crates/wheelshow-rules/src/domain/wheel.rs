//! Spinning the wheel.
//!
//! Wedge `i` of `N` occupies wheel-local angles `[i·s, (i+1)·s)` with
//! `s = 360/N`. Rotating the wheel by `r` puts wheel-local angle `a` at
//! screen angle `(-r - a) mod 360`. The pointer sits at a fixed screen
//! angle, so the wedge under it is found by inverting that placement:
//! `a = (-r - pointer) mod 360`, index `floor(a / s)`. No half-span
//! offset is applied; `placement` and `wedge_index_at` are exact inverses.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wheelshow_core::error::GameError;
use wheelshow_core::money::Money;
use wheelshow_core::rng::DeterministicRng;
use wheelshow_core::timer::{TimerId, Timers};

/// One slot on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WedgeSpec", into = "WedgeSpec")]
pub enum Wedge {
    /// Wipes the spinner's round money and passes the turn.
    Bankrupt,
    /// Passes the turn.
    LoseATurn,
    /// Value credited per matching letter.
    Cash(Money),
}

/// Configuration form of a wedge: a label or a dollar amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WedgeSpec {
    /// A dollar amount such as `0.75`.
    Amount(f64),
    /// `"BANKRUPT"`, `"LOSE A TURN"`, or a dollar amount written as text.
    Label(String),
}

impl TryFrom<WedgeSpec> for Wedge {
    type Error = GameError;

    fn try_from(spec: WedgeSpec) -> Result<Self, Self::Error> {
        match spec {
            WedgeSpec::Amount(dollars) => Ok(Self::Cash(Money::from_dollars(dollars))),
            WedgeSpec::Label(label) => {
                let normalized = label.trim().to_ascii_uppercase().replace(['_', '-'], " ");
                match normalized.as_str() {
                    "BANKRUPT" => Ok(Self::Bankrupt),
                    "LOSE A TURN" => Ok(Self::LoseATurn),
                    other => other
                        .trim_start_matches('$')
                        .parse::<f64>()
                        .map(|d| Self::Cash(Money::from_dollars(d)))
                        .map_err(|_| GameError::InvalidWedge(label)),
                }
            }
        }
    }
}

impl From<Wedge> for WedgeSpec {
    fn from(wedge: Wedge) -> Self {
        match wedge {
            Wedge::Bankrupt => Self::Label("BANKRUPT".to_owned()),
            Wedge::LoseATurn => Self::Label("LOSE A TURN".to_owned()),
            Wedge::Cash(amount) => Self::Amount(amount.dollars()),
        }
    }
}

/// The 24-wedge layout used when no configuration is given.
#[must_use]
pub fn default_wedges() -> Vec<Wedge> {
    const CENTS: [Option<i64>; 24] = [
        None,
        Some(75),
        Some(25),
        Some(30),
        Some(20),
        Some(250),
        Some(50),
        Some(40),
        Some(30),
        Some(20),
        None,
        Some(500),
        Some(20),
        Some(50),
        Some(45),
        Some(-1),
        Some(40),
        Some(25),
        Some(90),
        Some(15),
        Some(40),
        Some(60),
        Some(25),
        Some(30),
    ];
    CENTS
        .iter()
        .map(|c| match c {
            None => Wedge::Bankrupt,
            Some(-1) => Wedge::LoseATurn,
            Some(cents) => Wedge::Cash(Money::from_cents(*cents)),
        })
        .collect()
}

/// Spin dynamics. All angles in degrees, velocities in degrees per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinPhysics {
    /// Nominal animation tick.
    pub tick_ms: u64,
    /// Each spin offsets the tick by up to this much either way.
    pub tick_jitter_ms: u64,
    /// Lower bound on the jittered tick.
    pub min_tick_ms: u64,
    /// Weakest initial velocity.
    pub min_velocity: f64,
    /// Strongest initial velocity.
    pub max_velocity: f64,
    /// Fastest decay per tick.
    pub min_friction: f64,
    /// Slowest decay per tick.
    pub max_friction: f64,
    /// The wheel stops once its speed drops below this.
    pub stop_velocity: f64,
    /// Screen angle of the pointer; 90 is straight up.
    pub pointer_angle: f64,
}

impl Default for SpinPhysics {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            tick_jitter_ms: 2,
            min_tick_ms: 8,
            min_velocity: 30.0,
            max_velocity: 140.0,
            min_friction: 0.980,
            max_friction: 0.994,
            stop_velocity: 0.04,
            pointer_angle: 90.0,
        }
    }
}

/// Where a spin came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpinOutcome {
    /// Index of the wedge under the pointer.
    pub index: usize,
    /// The wedge under the pointer.
    pub wedge: Wedge,
}

/// Screen arc covered by one wedge, counter-clockwise from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WedgeArc {
    /// Screen angle where the arc begins.
    pub start: f64,
    /// Angular width of the arc.
    pub sweep: f64,
}

/// What a fired animation tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelTick {
    /// The wheel moved and is still turning.
    Moved {
        /// Rotation after the tick.
        rotation: f64,
    },
    /// The wheel came to rest.
    Stopped(SpinOutcome),
}

/// Read-only view for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelSnapshot {
    /// Current rotation in degrees.
    pub rotation: f64,
    /// Wedges in wheel order.
    pub wedges: Vec<Wedge>,
    /// Whether a spin is in progress.
    pub spinning: bool,
}

#[derive(Debug, Clone, Copy)]
struct Tick;

/// Rotation state machine driven by fixed animation ticks.
#[derive(Debug)]
pub struct WheelResolver {
    wedges: Vec<Wedge>,
    physics: SpinPhysics,
    rotation: f64,
    velocity: f64,
    friction: f64,
    interval_ms: u64,
    timers: Timers<Tick>,
    tick: Option<TimerId>,
}

impl WheelResolver {
    /// Creates a resting wheel.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyWheel` if `wedges` is empty.
    pub fn new(wedges: Vec<Wedge>, physics: SpinPhysics) -> Result<Self, GameError> {
        if wedges.is_empty() {
            return Err(GameError::EmptyWheel);
        }
        Ok(Self {
            wedges,
            physics,
            rotation: 0.0,
            velocity: 0.0,
            friction: physics.max_friction,
            interval_ms: physics.tick_ms,
            timers: Timers::new(),
            tick: None,
        })
    }

    /// Places the wheel at a given rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation.rem_euclid(360.0);
        self
    }

    /// Angular width of every wedge.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn wedge_span(&self) -> f64 {
        360.0 / self.wedges.len() as f64
    }

    /// Current rotation in degrees, in `[0, 360)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Wedges in wheel order.
    #[must_use]
    pub fn wedges(&self) -> &[Wedge] {
        &self.wedges
    }

    /// Whether a spin is in progress.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.tick.is_some()
    }

    /// Screen angle of wheel-local angle `local` at `rotation`.
    #[must_use]
    pub fn screen_angle(local: f64, rotation: f64) -> f64 {
        (-rotation - local).rem_euclid(360.0)
    }

    /// Screen arc covered by wedge `index` at `rotation`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn placement(&self, index: usize, rotation: f64) -> WedgeArc {
        let span = self.wedge_span();
        WedgeArc {
            start: Self::screen_angle((index + 1) as f64 * span, rotation),
            sweep: span,
        }
    }

    /// Screen angle of the middle of wedge `index`, where its label goes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn label_angle(&self, index: usize, rotation: f64) -> f64 {
        Self::screen_angle((index as f64 + 0.5) * self.wedge_span(), rotation)
    }

    /// Index of the wedge drawn at `screen_angle` when the wheel is at
    /// `rotation`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn wedge_index_at(&self, rotation: f64, screen_angle: f64) -> usize {
        let local = (-rotation - screen_angle).rem_euclid(360.0);
        (local / self.wedge_span()).floor() as usize % self.wedges.len()
    }

    /// The wedge under the pointer right now.
    #[must_use]
    pub fn resolve(&self) -> SpinOutcome {
        let index = self.wedge_index_at(self.rotation, self.physics.pointer_angle);
        SpinOutcome {
            index,
            wedge: self.wedges[index],
        }
    }

    /// Starts a spin with random strength and decay. Returns `false` if the
    /// wheel is already turning.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn spin(&mut self, now_ms: u64, rng: &mut dyn DeterministicRng) -> bool {
        if self.is_spinning() {
            return false;
        }
        let p = self.physics;
        self.velocity = rng.uniform(p.min_velocity, p.max_velocity);
        self.friction = rng.uniform(p.min_friction, p.max_friction);
        let jitter = p.tick_jitter_ms as f64;
        let jittered = (p.tick_ms as f64 + rng.uniform(-jitter, jitter)).trunc();
        self.interval_ms = (jittered.max(0.0) as u64).max(p.min_tick_ms);
        self.tick = Some(self.timers.schedule_at(now_ms + self.interval_ms, Tick));
        info!(
            velocity = self.velocity,
            friction = self.friction,
            interval_ms = self.interval_ms,
            "wheel spinning"
        );
        true
    }

    /// Advances the wheel by one tick; returns the outcome once it stops.
    pub fn step(&mut self) -> Option<SpinOutcome> {
        self.rotation = (self.rotation + self.velocity).rem_euclid(360.0);
        self.velocity *= self.friction;
        (self.velocity.abs() < self.physics.stop_velocity).then(|| self.resolve())
    }

    /// Deadline of the next animation tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fires the animation tick if it is due.
    pub fn fire_due(&mut self, now_ms: u64) -> Option<WheelTick> {
        let fired = self.timers.pop_due(now_ms)?;
        if self.tick != Some(fired.id) {
            return None;
        }
        if let Some(outcome) = self.step() {
            self.tick = None;
            info!(index = outcome.index, wedge = ?outcome.wedge, "wheel stopped");
            return Some(WheelTick::Stopped(outcome));
        }
        self.tick = Some(self.timers.schedule_at(fired.due_ms + self.interval_ms, Tick));
        debug!(rotation = self.rotation, velocity = self.velocity, "wheel tick");
        Some(WheelTick::Moved {
            rotation: self.rotation,
        })
    }

    /// Stops the wheel where it is without resolving.
    pub fn halt(&mut self) {
        self.timers.cancel_all();
        self.tick = None;
        self.velocity = 0.0;
    }

    /// Read-only view for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot {
            rotation: self.rotation,
            wedges: self.wedges.clone(),
            spinning: self.is_spinning(),
        }
    }
}
