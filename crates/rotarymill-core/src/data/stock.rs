//! Workpiece geometry
//!
//! - `Stock`: round bar milled on the rotary axis
//! - `Fixture`: headed pin trimmed from two sides

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Cylindrical stock clamped in the rotary axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Outer diameter (mm)
    pub diameter: f64,
    /// Milled length along Y (mm)
    pub length: f64,
}

impl Stock {
    pub fn new(diameter: f64, length: f64) -> Self {
        Self { diameter, length }
    }

    /// Outer circumference (π × diameter)
    pub fn circumference(&self) -> f64 {
        PI * self.diameter
    }
}

/// Fixture pin with a round head on a thinner shaft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Diameter of the head (mm)
    pub head_diameter: f64,
    /// Thickness of the head along X (mm)
    pub head_thickness: f64,
    /// Diameter of the shaft below the head (mm)
    pub shaft_diameter: f64,
}

impl Fixture {
    pub fn new(head_diameter: f64, head_thickness: f64, shaft_diameter: f64) -> Self {
        Self {
            head_diameter,
            head_thickness,
            shaft_diameter,
        }
    }

    pub fn head_radius(&self) -> f64 {
        self.head_diameter / 2.0
    }
}
