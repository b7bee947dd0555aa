//! Data models for positions, feed rates and machining geometry
//!
//! This module provides:
//! - Linear axes (X, Y, Z) in emission order
//! - Partial positions for moves that only touch some axes
//! - Fully resolved coordinates for the machine's last known position
//! - Feed rate classes and their numeric velocities
//! - Stock, fixture and end mill dimensions

pub mod feed_rate;
pub mod stock;
pub mod tools;

pub use feed_rate::{FeedRate, FeedRates};
pub use stock::{Fixture, Stock};
pub use tools::EndMill;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear machine axis
///
/// The derived ordering is the order in which axes appear on a motion line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All linear axes in emission order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// G-code word letter for this axis
    pub fn letter(&self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Format a coordinate or angle the way it appears in a program
///
/// Uses the shortest decimal representation that round-trips
/// (`5`, `4.375`, `-2.8499999999999996`). Negative zero prints as `0`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Fully resolved X/Y/Z coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Coordinates {
    /// Create coordinates from all three axes
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Value of a single axis
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Overwrite a single axis
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }

    /// Whether every axis holds a finite value
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X{} Y{} Z{}",
            format_value(self.x),
            format_value(self.y),
            format_value(self.z)
        )
    }
}

/// Target of a move; only the axes that are `Some` change
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialPosition {
    /// X-axis position (if Some, update this axis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Y-axis position (if Some, update this axis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Z-axis position (if Some, update this axis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl PartialPosition {
    /// Create a new empty partial position (all axes None)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a partial position with only X axis set
    pub fn x_only(x: f64) -> Self {
        Self {
            x: Some(x),
            ..Default::default()
        }
    }

    /// Create a partial position with only Y axis set
    pub fn y_only(y: f64) -> Self {
        Self {
            y: Some(y),
            ..Default::default()
        }
    }

    /// Create a partial position with only Z axis set
    pub fn z_only(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Default::default()
        }
    }

    /// Create a partial position with XY axes set
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Create a partial position with XZ axes set
    pub fn xz(x: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            z: Some(z),
            ..Default::default()
        }
    }

    /// Create a partial position with XYZ axes set
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Builder-style setter for a single axis
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = Some(value),
            Axis::Y => self.y = Some(value),
            Axis::Z => self.z = Some(value),
        }
        self
    }

    /// Value of a single axis, if specified
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Specified axes with their values, in emission order
    pub fn axes(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(move |axis| self.get(axis).map(|value| (axis, value)))
    }

    /// True when no axis is specified
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Apply this partial position to existing coordinates, updating only specified axes
    pub fn apply_to(&self, coords: &Coordinates) -> Coordinates {
        Coordinates {
            x: self.x.unwrap_or(coords.x),
            y: self.y.unwrap_or(coords.y),
            z: self.z.unwrap_or(coords.z),
        }
    }
}

impl From<Coordinates> for PartialPosition {
    fn from(coords: Coordinates) -> Self {
        Self::xyz(coords.x, coords.y, coords.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(4.375), "4.375");
        assert_eq!(format_value(-11.925), "-11.925");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value((13.85 - 8.15) / 2.0), "2.8499999999999996");
    }

    #[test]
    fn test_axes_are_emitted_in_order() {
        let pos = PartialPosition::new().with(Axis::Z, 1.0).with(Axis::X, 2.0);
        let axes: Vec<_> = pos.axes().collect();
        assert_eq!(axes, vec![(Axis::X, 2.0), (Axis::Z, 1.0)]);
    }

    #[test]
    fn test_apply_to_keeps_missing_axes() {
        let base = Coordinates::new(1.0, 2.0, 3.0);
        let moved = PartialPosition::y_only(7.0).apply_to(&base);
        assert_eq!(moved, Coordinates::new(1.0, 7.0, 3.0));
    }

    #[test]
    fn test_empty_partial_position() {
        assert!(PartialPosition::new().is_empty());
        assert!(!PartialPosition::z_only(0.0).is_empty());
    }

    #[test]
    fn test_partial_position_deserializes_missing_axes() {
        let pos: PartialPosition = serde_json::from_str(r#"{"y": 4.5}"#).unwrap();
        assert_eq!(pos, PartialPosition::y_only(4.5));
    }
}
