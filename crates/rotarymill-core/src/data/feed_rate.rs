//! Feed rate classes
//!
//! A program only ever moves at one of two named rates: the cutting
//! (`standard`) rate or the traverse (`rapid`) rate. Each class maps to a
//! motion word (`G1` / `G0`) and to a numeric velocity bound when the
//! writer is created.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named feed rate class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedRate {
    /// Cutting speed, emitted as `G1`
    #[default]
    Standard,
    /// Non-cutting traverse, emitted as `G0`
    Rapid,
}

impl FeedRate {
    /// Name used in rate declaration lines
    pub fn name(&self) -> &'static str {
        match self {
            FeedRate::Standard => "standard",
            FeedRate::Rapid => "rapid",
        }
    }

    /// Motion word for linear moves at this rate
    pub fn motion_code(&self) -> &'static str {
        match self {
            FeedRate::Standard => "G1",
            FeedRate::Rapid => "G0",
        }
    }
}

impl fmt::Display for FeedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeedRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "rapid" => Ok(Self::Rapid),
            other => Err(CoreError::UnknownFeedRate(other.to_string())),
        }
    }
}

/// Numeric velocity for each feed rate class (units/min)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedRates {
    /// Cutting feed rate
    pub standard: f64,
    /// Traverse feed rate
    pub rapid: f64,
}

impl FeedRates {
    pub fn new(standard: f64, rapid: f64) -> Self {
        Self { standard, rapid }
    }

    /// Velocity bound to a rate class
    pub fn get(&self, rate: FeedRate) -> f64 {
        match rate {
            FeedRate::Standard => self.standard,
            FeedRate::Rapid => self.rapid,
        }
    }
}

impl Default for FeedRates {
    fn default() -> Self {
        Self {
            standard: 500.0,
            rapid: 800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_rates() {
        assert_eq!("standard".parse::<FeedRate>(), Ok(FeedRate::Standard));
        assert_eq!("rapid".parse::<FeedRate>(), Ok(FeedRate::Rapid));
    }

    #[test]
    fn test_parse_unknown_rate() {
        let err = "Rapid".parse::<FeedRate>().unwrap_err();
        assert_eq!(err, CoreError::UnknownFeedRate("Rapid".to_string()));
    }

    #[test]
    fn test_motion_codes() {
        assert_eq!(FeedRate::Standard.motion_code(), "G1");
        assert_eq!(FeedRate::Rapid.motion_code(), "G0");
    }

    #[test]
    fn test_default_rate_is_standard() {
        assert_eq!(FeedRate::default(), FeedRate::Standard);
    }

    #[test]
    fn test_rates_lookup() {
        let rates = FeedRates::new(35.0, 800.0);
        assert_eq!(rates.get(FeedRate::Standard), 35.0);
        assert_eq!(rates.get(FeedRate::Rapid), 800.0);
    }
}
