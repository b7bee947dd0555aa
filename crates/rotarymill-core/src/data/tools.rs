//! Cutting tool geometry

use serde::{Deserialize, Serialize};

/// Flat end mill described by its cutting diameter (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EndMill {
    pub diameter: f64,
}

impl EndMill {
    pub fn new(diameter: f64) -> Self {
        Self { diameter }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_half_diameter() {
        assert_eq!(EndMill::new(6.0).radius(), 3.0);
    }
}
