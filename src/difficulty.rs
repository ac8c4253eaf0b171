use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Game difficulty, fixed for the lifetime of a session.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Minimum balloon speed in field-percent per tick.
    pub fn base_speed(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.35,
            Difficulty::Hard => 0.45,
        }
    }

    /// Uniform jitter added on top of the base speed, drawn once per balloon.
    pub fn speed_jitter(&self) -> f64 {
        0.3
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy - single letters",
            Difficulty::Medium => "Medium - 3-4 letter words",
            Difficulty::Hard => "Hard - 5+ letter words",
        }
    }
}
