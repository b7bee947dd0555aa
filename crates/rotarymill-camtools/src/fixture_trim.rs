//! Fixture Trim
//!
//! Trims the round head of a fixture pin to a flat width and flattens the
//! underside of the head down to the shaft, one side at a time. Between the
//! two sides the program pauses so the operator can turn the workpiece.

use crate::error::{CamToolError, CamToolResult};
use crate::gcode_writer::MotionWriter;
use rotarymill_core::{format_value, Coordinates, EndMill, FeedRates, Fixture, PartialPosition};
use serde::{Deserialize, Serialize};
use tracing::info;

fn default_clearance() -> f64 {
    2.0
}

fn default_return_offset() -> f64 {
    1.0
}

/// Parameters for the Fixture Trim CAMTool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureTrimParameters {
    /// Pin being trimmed
    pub fixture: Fixture,
    /// End mill used for both sides
    pub tool: EndMill,
    /// Width across the head after trimming (mm)
    pub desired_head_width: f64,
    /// Extra travel beyond the head on each Y stroke (mm)
    #[serde(default = "default_clearance")]
    pub clearance: f64,
    /// Y offset applied when re-entering the cut after the workpiece is turned (mm)
    #[serde(default = "default_return_offset")]
    pub return_offset: f64,
}

impl FixtureTrimParameters {
    pub fn new(fixture: Fixture, tool: EndMill, desired_head_width: f64) -> Self {
        Self {
            fixture,
            tool,
            desired_head_width,
            clearance: default_clearance(),
            return_offset: default_return_offset(),
        }
    }

    /// Material removed from each side of the head
    pub fn head_trimming_depth(&self) -> f64 {
        (self.fixture.head_diameter - self.desired_head_width) / 2.0
    }

    /// Depth from the head rim down to the shaft
    pub fn shaft_depth(&self) -> f64 {
        (self.fixture.head_diameter - self.fixture.shaft_diameter) / 2.0
    }

    /// X of the tool centre when it is cutting alongside the head
    pub fn center_head_x(&self) -> f64 {
        self.fixture.head_thickness / 2.0 + self.tool.radius()
    }

    /// Y reached on either side of the head by a full stroke
    pub fn reach(&self) -> f64 {
        self.fixture.head_radius() + self.tool.radius() + self.clearance
    }
}

/// Generator for Fixture Trim G-Code
pub struct FixtureTrimGenerator {
    params: FixtureTrimParameters,
}

impl FixtureTrimGenerator {
    pub fn new(params: FixtureTrimParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FixtureTrimParameters {
        &self.params
    }

    pub fn validate(&self) -> CamToolResult<()> {
        let p = &self.params;
        let values = [
            ("fixture.head_diameter", p.fixture.head_diameter),
            ("fixture.head_thickness", p.fixture.head_thickness),
            ("fixture.shaft_diameter", p.fixture.shaft_diameter),
            ("tool.diameter", p.tool.diameter),
            ("desired_head_width", p.desired_head_width),
            ("clearance", p.clearance),
            ("return_offset", p.return_offset),
        ];
        match values.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(CamToolError::InvalidParameters(format!(
                "{} must be a finite number, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }

    /// Drive `writer` through both sides of the trim
    pub fn generate(&self, writer: &mut MotionWriter) -> CamToolResult<()> {
        self.validate()?;
        let p = &self.params;
        let head_depth = -p.head_trimming_depth();
        let shaft_depth = -p.shaft_depth();
        let center_x = p.center_head_x();
        let reach = p.reach();

        info!(
            "Fixture trim: head depth {}, shaft depth {}",
            format_value(head_depth),
            format_value(shaft_depth)
        );

        writer.safe_height()?;
        writer.rapid(
            PartialPosition::xy(center_x, -reach),
            Some("Prepare for trimming head width"),
        )?;
        writer.rapid(PartialPosition::z_only(head_depth), None)?;
        writer.feed(
            PartialPosition::y_only(reach),
            Some("Trimming head width one side"),
        )?;
        writer.rapid(
            PartialPosition::x_only(p.tool.diameter + p.fixture.head_thickness),
            Some("Moving to alongside of the bottom of the head"),
        )?;
        writer.rapid(PartialPosition::z_only(shaft_depth), Some("Plunging to shaft"))?;
        writer.feed(
            PartialPosition::y_only(-reach),
            Some("Flattening bottom of head one side"),
        )?;
        let shaft_start = writer.current_coordinates();
        writer.move_to_safety()?;

        writer.wait_for_user(Some(
            "Rotate workpiece 180 degrees now and press start to continue",
        ));

        writer.rapid(
            PartialPosition::xyz(
                shaft_start.x,
                shaft_start.y + p.return_offset,
                shaft_start.z,
            ),
            Some("Moving back into position to mill"),
        )?;
        writer.feed(
            PartialPosition::y_only(-reach),
            Some("Trimming shaft other side"),
        )?;
        writer.rapid(PartialPosition::xz(center_x, head_depth), None)?;
        writer.feed(
            PartialPosition::y_only(reach),
            Some("Milling other side of head"),
        )?;
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

    pub fn output_file_name(&self) -> String {
        format!(
            "fixture_head-{}_width-{}.nc",
            format_value(self.params.fixture.head_diameter),
            format_value(self.params.desired_head_width)
        )
    }
}
