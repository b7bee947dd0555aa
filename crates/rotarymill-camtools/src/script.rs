//! Program scripts
//!
//! A literal list of writer operations, usually loaded from a job file,
//! replayed in order on a `MotionWriter`. Feed rate classes are given by
//! name so a typo in the file is caught by the writer instead of silently
//! cutting at the wrong speed.

use crate::error::{CamToolError, CamToolResult};
use crate::gcode_writer::MotionWriter;
use rotarymill_core::{CoreResult, PartialPosition};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_rate() -> String {
    "standard".to_string()
}

/// One writer operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Linear move at a named rate class
    Move {
        #[serde(flatten)]
        position: PartialPosition,
        #[serde(default = "default_rate")]
        rate: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    Feed {
        #[serde(flatten)]
        position: PartialPosition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    Rapid {
        #[serde(flatten)]
        position: PartialPosition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    Rotate {
        angle: f64,
    },
    WaitForUser {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    SafeHeight,
    MoveToSafety,
}

impl ScriptStep {
    fn apply(&self, writer: &mut MotionWriter) -> CoreResult<()> {
        match self {
            ScriptStep::Move {
                position,
                rate,
                comment,
            } => writer.move_named(*position, rate, comment.as_deref()),
            ScriptStep::Feed { position, comment } => writer.feed(*position, comment.as_deref()),
            ScriptStep::Rapid { position, comment } => {
                writer.rapid(*position, comment.as_deref())
            }
            ScriptStep::Rotate { angle } => {
                writer.rotate(*angle);
                Ok(())
            }
            ScriptStep::WaitForUser { comment } => {
                writer.wait_for_user(comment.as_deref());
                Ok(())
            }
            ScriptStep::SafeHeight => writer.safe_height(),
            ScriptStep::MoveToSafety => writer.move_to_safety(),
        }
    }
}

/// Ordered list of writer operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramScript {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl ProgramScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    /// Replay every step on `writer`
    ///
    /// Stops at the first step the writer rejects; that step leaves no
    /// trace in the program.
    pub fn run(&self, writer: &mut MotionWriter) -> CamToolResult<()> {
        for (index, step) in self.steps.iter().enumerate() {
            debug!("Script step {}: {:?}", index, step);
            step.apply(writer)
                .map_err(|source| CamToolError::ScriptStep { index, source })?;
        }
        Ok(())
    }
}
