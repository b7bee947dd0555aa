//! Rotary Surfacing
//!
//! Mills round stock clamped in the A-axis down to a target depth. Each
//! depth pass is a sweep of axial feeds along Y alternating with rotations,
//! cutting on both the outbound and the return stroke. Successive sweeps
//! keep rotating from where the previous one stopped so the facets of one
//! pass are staggered against the next.

use crate::error::{CamToolError, CamToolResult};
use crate::gcode_writer::MotionWriter;
use rotarymill_core::{format_value, Coordinates, EndMill, FeedRates, PartialPosition, Stock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Degrees in one revolution of the rotary axis
pub const FULL_TURN: f64 = 360.0;

/// Upper bound on angular steps per revolution and on depth passes
pub const MAX_STEPS: usize = 100_000;

/// Relative slack when dividing the target depth into passes
const DEPTH_TOLERANCE: f64 = 1e-9;

/// Whole number of increments covering `ratio`, `None` past `MAX_STEPS`
fn step_count(ratio: f64) -> Option<usize> {
    let count = ratio.ceil();
    if count <= MAX_STEPS as f64 {
        Some(count.max(0.0) as usize)
    } else {
        None
    }
}

/// Parameters for the Rotary Surfacing CAMTool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotarySurfacingParameters {
    /// Stock clamped in the rotary axis
    pub stock: Stock,
    /// End mill used for every pass
    pub tool: EndMill,
    /// Final depth relative to the stock surface (mm, negative cuts into the stock)
    pub target_depth: f64,
    /// Largest depth removed by a single pass (mm)
    pub max_step_down: f64,
}

/// Generator for Rotary Surfacing G-Code
pub struct RotarySurfacingGenerator {
    params: RotarySurfacingParameters,
}

impl RotarySurfacingGenerator {
    /// Create a new RotarySurfacingGenerator with the given parameters
    pub fn new(params: RotarySurfacingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RotarySurfacingParameters {
        &self.params
    }

    /// Reject parameters that would put NaN or infinity into the program
    pub fn validate(&self) -> CamToolResult<()> {
        let p = &self.params;
        let values = [
            ("stock.diameter", p.stock.diameter),
            ("stock.length", p.stock.length),
            ("tool.diameter", p.tool.diameter),
            ("target_depth", p.target_depth),
            ("max_step_down", p.max_step_down),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(CamToolError::InvalidParameters(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        if self.angular_step_ratio().and_then(step_count).is_none() {
            return Err(CamToolError::InvalidParameters(format!(
                "stock circumference {} needs more than {} steps with tool radius {}",
                format_value(p.stock.circumference()),
                MAX_STEPS,
                format_value(p.tool.radius())
            )));
        }
        if self.depth_step_ratio().and_then(step_count).is_none() {
            return Err(CamToolError::InvalidParameters(format!(
                "target depth {} needs more than {} passes of {}",
                format_value(p.target_depth),
                MAX_STEPS,
                format_value(self.depth_step())
            )));
        }
        Ok(())
    }

    fn angular_step_ratio(&self) -> Option<f64> {
        let circumference = self.params.stock.circumference();
        let radius = self.params.tool.radius();
        if circumference <= 0.0 || radius <= 0.0 {
            return Some(0.0);
        }
        let ratio = circumference / radius;
        ratio.is_finite().then_some(ratio)
    }

    fn depth_step_ratio(&self) -> Option<f64> {
        let step = self.depth_step();
        if self.params.target_depth >= 0.0 || step <= 0.0 {
            return Some(0.0);
        }
        let ratio = self.params.target_depth.abs() / step;
        // a quotient a hair above a whole number is rounding, not a remainder
        ratio
            .is_finite()
            .then(|| ratio * (1.0 - DEPTH_TOLERANCE))
    }

    /// Number of rotary increments needed to go around the stock once
    ///
    /// One increment advances the surface by at most one tool radius.
    /// Zero when the stock has no circumference or the tool no radius.
    /// Saturates at `MAX_STEPS`; `validate` rejects anything beyond.
    pub fn angular_step_count(&self) -> usize {
        self.angular_step_ratio()
            .map_or(MAX_STEPS, |ratio| step_count(ratio).unwrap_or(MAX_STEPS))
    }

    /// Rotation between two neighbouring axial strokes (degrees)
    pub fn angular_step(&self) -> f64 {
        match self.angular_step_count() {
            0 => 0.0,
            count => FULL_TURN / count as f64,
        }
    }

    /// Depth removed per pass, clamped to the target depth
    pub fn depth_step(&self) -> f64 {
        self.params
            .max_step_down
            .min(self.params.target_depth.abs())
    }

    /// Z of every depth pass in cutting order
    ///
    /// Pass `k` cuts to `-min(k * depth_step(), |target|)`; the last pass
    /// lands exactly on the target. Saturates at `MAX_STEPS` passes.
    pub fn depth_passes(&self) -> Vec<f64> {
        let target = self.params.target_depth.abs();
        let step = self.depth_step();
        let count = self
            .depth_step_ratio()
            .map_or(MAX_STEPS, |ratio| step_count(ratio).unwrap_or(MAX_STEPS));

        (1..=count)
            .map(|k| {
                if k == count {
                    -target
                } else {
                    -(k as f64 * step).min(target)
                }
            })
            .collect()
    }

    /// Cut one full revolution at the current depth
    ///
    /// Starts at `start_angle` and returns the angle the revolution ends on,
    /// which is where the next sweep has to start.
    pub fn sweep(&self, writer: &mut MotionWriter, start_angle: f64) -> CamToolResult<f64> {
        let count = self.angular_step_count();
        let step = self.angular_step();
        let length = self.params.stock.length;
        let angle_at = |index: usize| {
            if index >= count {
                start_angle + FULL_TURN
            } else {
                start_angle + index as f64 * step
            }
        };

        debug!(
            "Sweep from A{} in {} steps of {}",
            format_value(start_angle),
            count,
            format_value(step)
        );

        for index in (0..=count).step_by(2) {
            writer.feed(PartialPosition::y_only(length), None)?;
            writer.rotate(angle_at(index));
            if index >= count {
                break;
            }
            writer.feed(PartialPosition::y_only(0.0), None)?;
            writer.rotate(angle_at(index + 1));
        }

        Ok(start_angle + FULL_TURN)
    }

    /// Drive `writer` through the complete surfacing program
    pub fn generate(&self, writer: &mut MotionWriter) -> CamToolResult<()> {
        self.validate()?;
        let p = &self.params;

        let passes = if self.angular_step_count() == 0 {
            warn!(
                "Stock circumference {} or tool radius {} leaves nothing to cut",
                format_value(p.stock.circumference()),
                format_value(p.tool.radius())
            );
            Vec::new()
        } else {
            self.depth_passes()
        };
        if passes.is_empty() {
            warn!(
                "No depth passes for target depth {} with step {}",
                format_value(p.target_depth),
                format_value(p.max_step_down)
            );
        }

        info!(
            "Rotary surfacing: {} passes, {} angular steps of {} degrees",
            passes.len(),
            self.angular_step_count(),
            format_value(self.angular_step())
        );

        writer.move_to_safety()?;

        let mut angle = 0.0;
        let total = passes.len();
        for (i, depth) in passes.into_iter().enumerate() {
            debug!("Depth pass {}/{} at Z{}", i + 1, total, format_value(depth));
            let comment = format!("Depth pass {}/{}", i + 1, total);
            writer.feed(PartialPosition::z_only(depth), Some(&comment))?;
            angle = self.sweep(writer, angle)?;
        }

        writer.move_to_safety()?;
        Ok(())
    }

    /// Build a writer and return the finished program text
    pub fn generate_gcode(
        &self,
        feed_rates: FeedRates,
        safe_location: Coordinates,
    ) -> CamToolResult<String> {
        let mut writer = MotionWriter::new(feed_rates, safe_location);
        self.generate(&mut writer)?;
        Ok(writer.generate())
    }

    /// File name encoding the key parameters of this job
    pub fn output_file_name(&self) -> String {
        let p = &self.params;
        format!(
            "stock_thickness-{}_length-{}_depth-{}_step-{}.nc",
            format_value(p.stock.diameter),
            format_value(p.stock.length),
            format_value(p.target_depth),
            format_value(self.depth_step())
        )
    }
}
