pub mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use store::{AudioFileStore, StoreError};

pub const MIN_NUMBER: i64 = 1;
pub const MAX_NUMBER: i64 = 100;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("Number must be between 1 and 100, got {0}")]
    OutOfRange(i64),

    #[error("Number must be an integer, got '{0}'")]
    NotAnInteger(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeedError {
    #[error("Invalid speed '{0}'. Must be: slow, normal, or fast")]
    Invalid(String),
}

/// A dictation number, always within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number(u8);

impl Number {
    pub fn new(value: i64) -> Result<Self, NumberError> {
        if (MIN_NUMBER..=MAX_NUMBER).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(NumberError::OutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every valid number in ascending order.
    pub fn all() -> impl Iterator<Item = Number> {
        (MIN_NUMBER..=MAX_NUMBER).map(|n| Number(n as u8))
    }

    /// File name of the clip for this number, e.g. `007.mp3`.
    pub fn file_name(self) -> String {
        format!("{:03}.mp3", self.0)
    }
}

impl TryFrom<i64> for Number {
    type Error = NumberError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Number::new(value)
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| NumberError::NotAnInteger(s.to_string()))?;
        Number::new(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn as_str(self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            other => Err(SpeedError::Invalid(other.to_string())),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speaking-rate multipliers passed to the synthesizer for each speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRates {
    pub slow: f32,
    pub normal: f32,
    pub fast: f32,
}

impl SpeedRates {
    pub fn rate(&self, speed: Speed) -> f32 {
        match speed {
            Speed::Slow => self.slow,
            Speed::Normal => self.normal,
            Speed::Fast => self.fast,
        }
    }
}

impl Default for SpeedRates {
    fn default() -> Self {
        Self {
            slow: 0.7,
            normal: 1.0,
            fast: 1.3,
        }
    }
}
