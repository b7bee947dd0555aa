//! # RotaryMill CAM Tools
//!
//! This crate provides the G-code writer and the toolpath generators that
//! drive it.
//!
//! ## CAM Tools Included
//!
//! - **Rotary Surfacing**: Mill round stock in the A-axis down to a target depth
//! - **Fixture Trim**: Two-sided head and shaft trim with a manual flip in between
//! - **Program Script**: Replay a literal list of moves from a job file
//!
//! ## Supporting Infrastructure
//!
//! - **Motion Writer**: Feed rate coalescing, absolute position tracking and safe retracts

pub mod error;
pub mod fixture_trim;
pub mod gcode_writer;
pub mod rotary_surfacing;
pub mod script;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult};
pub use fixture_trim::{FixtureTrimGenerator, FixtureTrimParameters};
pub use gcode_writer::{MotionWriter, LINE_ENDING};
pub use rotary_surfacing::{
    RotarySurfacingGenerator, RotarySurfacingParameters, FULL_TURN, MAX_STEPS,
};
pub use script::{ProgramScript, ScriptStep};
