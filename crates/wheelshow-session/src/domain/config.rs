//! Show configuration.

use serde::{Deserialize, Serialize};
use wheelshow_board::domain::reveal::RevealTimings;
use wheelshow_core::error::GameError;
use wheelshow_core::money::Money;
use wheelshow_rules::domain::wheel::{SpinPhysics, Wedge, default_wedges};

/// Toss-up cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TossUpConfig {
    /// Interval between automatic reveals.
    pub tick_ms: u64,
    /// Pause after a wrong answer before reveals resume.
    pub resume_delay_ms: u64,
    /// Share of the phrase's consonants shown when the toss-up starts.
    pub pre_reveal_ratio: f64,
}

impl Default for TossUpConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1500,
            resume_delay_ms: 3000,
            pre_reveal_ratio: 0.2,
        }
    }
}

/// Bonus-round rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Letters shown before the contestant chooses.
    pub given_letters: String,
    /// Consonants the contestant picks.
    pub consonants: usize,
    /// Vowels the contestant picks.
    pub vowels: usize,
    /// Time the contestant has to solve once the letters are in.
    pub countdown_ms: u64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            given_letters: "RSTLNE".to_owned(),
            consonants: 3,
            vowels: 1,
            countdown_ms: 10_000,
        }
    }
}

/// Everything tunable about a show. Every field has a default, so an
/// empty YAML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Price of a vowel.
    pub vowel_cost: Money,
    /// Wheel layout.
    pub wedges: Vec<Wedge>,
    /// Board animation cadence.
    pub reveal: RevealTimings,
    /// Wheel dynamics.
    pub wheel: SpinPhysics,
    /// Toss-up cadence.
    pub toss_up: TossUpConfig,
    /// Bonus-round rules.
    pub bonus: BonusConfig,
    /// Whether solving the final-spin puzzle clears round scores the way a
    /// regular round does.
    pub final_spin_closes_like_main: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vowel_cost: Money::from_cents(25),
            wedges: default_wedges(),
            reveal: RevealTimings::default(),
            wheel: SpinPhysics::default(),
            toss_up: TossUpConfig::default(),
            bonus: BonusConfig::default(),
            final_spin_closes_like_main: true,
        }
    }
}

impl GameConfig {
    /// Parses and validates a YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the document does not parse,
    /// `GameError::InvalidWedge` for an unrecognised wedge, or any error
    /// from [`GameConfig::validate`].
    pub fn from_yaml_str(raw: &str) -> Result<Self, GameError> {
        let config: Self = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(raw).map_err(|e| GameError::Configuration(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a show cannot run without.
    ///
    /// # Errors
    ///
    /// Returns `GameError::EmptyWheel` for an empty wedge list and
    /// `GameError::Configuration` for an out-of-range value.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.wedges.is_empty() {
            return Err(GameError::EmptyWheel);
        }
        if self.vowel_cost < Money::ZERO {
            return Err(GameError::Configuration("vowel_cost must not be negative".to_owned()));
        }
        let w = &self.wheel;
        if w.min_velocity > w.max_velocity || w.min_velocity <= 0.0 {
            return Err(GameError::Configuration(
                "wheel velocity range must be positive and ordered".to_owned(),
            ));
        }
        if w.min_friction > w.max_friction || w.min_friction <= 0.0 || w.max_friction >= 1.0 {
            return Err(GameError::Configuration(
                "wheel friction range must lie inside (0, 1) and be ordered".to_owned(),
            ));
        }
        if w.min_tick_ms == 0 {
            return Err(GameError::Configuration("wheel min_tick_ms must be positive".to_owned()));
        }
        if !(0.0..=1.0).contains(&self.toss_up.pre_reveal_ratio) {
            return Err(GameError::Configuration(
                "toss_up pre_reveal_ratio must be between 0 and 1".to_owned(),
            ));
        }
        if self.toss_up.tick_ms == 0 {
            return Err(GameError::Configuration("toss_up tick_ms must be positive".to_owned()));
        }
        Ok(())
    }

    /// The bonus round's given letters, uppercased.
    #[must_use]
    pub fn given_letters(&self) -> Vec<char> {
        self.bonus
            .given_letters
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }
}
