//! Motion command writer
//!
//! Turns logical moves into G-code lines while tracking the machine state
//! a controller in absolute mode would have: the active feed rate class and
//! the last commanded X/Y/Z. Rate declarations are only emitted when the
//! class changes and each motion line only carries the axes that move.

use rotarymill_core::{
    format_value, Coordinates, CoreError, CoreResult, FeedRate, FeedRates, PartialPosition,
};
use tracing::trace;

/// Line terminator expected by the controller
pub const LINE_ENDING: &str = "\r\n";

const SAFE_HEIGHT_COMMENT: &str = "Safe height";
const SAFE_LOCATION_COMMENT: &str = "Moving to safe location";

/// Stateful G-code emitter for one program
#[derive(Debug, Clone)]
pub struct MotionWriter {
    feed_rates: FeedRates,
    safe_location: Coordinates,
    lines: Vec<String>,
    last_feed_rate: Option<FeedRate>,
    last_position: Coordinates,
}

impl MotionWriter {
    /// Create a writer for a new program
    ///
    /// The standard rate is declared straight away so the program never
    /// starts cutting with an undefined feed.
    pub fn new(feed_rates: FeedRates, safe_location: Coordinates) -> Self {
        let mut writer = Self {
            feed_rates,
            safe_location,
            lines: Vec::new(),
            last_feed_rate: None,
            last_position: Coordinates::default(),
        };
        writer.set_feed_rate(FeedRate::Standard);
        writer
    }

    pub fn feed_rates(&self) -> FeedRates {
        self.feed_rates
    }

    pub fn safe_location(&self) -> Coordinates {
        self.safe_location
    }

    /// Rate class of the last declaration line
    pub fn last_feed_rate(&self) -> Option<FeedRate> {
        self.last_feed_rate
    }

    /// Linear move to `position` at `rate`
    ///
    /// Axes absent from `position` keep their last value. Fails without
    /// emitting anything when `position` names no axis.
    pub fn move_to(
        &mut self,
        position: PartialPosition,
        rate: FeedRate,
        comment: Option<&str>,
    ) -> CoreResult<()> {
        if position.is_empty() {
            return Err(CoreError::EmptyPosition);
        }

        self.set_feed_rate(rate);

        let mut line = rate.motion_code().to_string();
        for (axis, value) in position.axes() {
            line.push(' ');
            line.push(axis.letter());
            line.push_str(&format_value(value));
            self.last_position.set(axis, value);
        }

        self.add(line, comment);
        Ok(())
    }

    /// Linear move with the rate class given by name
    ///
    /// The name is resolved before anything is emitted, so an unknown rate
    /// leaves the program untouched.
    pub fn move_named(
        &mut self,
        position: PartialPosition,
        rate: &str,
        comment: Option<&str>,
    ) -> CoreResult<()> {
        let rate: FeedRate = rate.parse()?;
        self.move_to(position, rate, comment)
    }

    /// Cutting move
    pub fn feed(&mut self, position: PartialPosition, comment: Option<&str>) -> CoreResult<()> {
        self.move_to(position, FeedRate::Standard, comment)
    }

    /// Traverse move
    pub fn rapid(&mut self, position: PartialPosition, comment: Option<&str>) -> CoreResult<()> {
        self.move_to(position, FeedRate::Rapid, comment)
    }

    /// Absolute positioning of the rotary A-axis
    ///
    /// Always a `G1` word and independent of the linear feed rate state.
    pub fn rotate(&mut self, angle: f64) {
        let angle = format_value(angle);
        let comment = format!("Rotate {}", angle);
        self.add(format!("G1 A{}", angle), Some(&comment));
    }

    /// Program pause for manual intervention
    pub fn wait_for_user(&mut self, comment: Option<&str>) {
        self.add("M0".to_string(), comment);
    }

    /// Retract Z to the safe height
    pub fn safe_height(&mut self) -> CoreResult<()> {
        let z = self.safe_location.z;
        self.rapid(PartialPosition::z_only(z), Some(SAFE_HEIGHT_COMMENT))
    }

    /// Retract vertically, then traverse to the safe X/Y
    pub fn move_to_safety(&mut self) -> CoreResult<()> {
        self.safe_height()?;
        let Coordinates { x, y, .. } = self.safe_location;
        self.rapid(PartialPosition::xy(x, y), Some(SAFE_LOCATION_COMMENT))
    }

    /// Snapshot of the last commanded X/Y/Z
    pub fn current_coordinates(&self) -> Coordinates {
        self.last_position
    }

    /// Lines emitted so far, without terminators
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole program, one command per line
    pub fn generate(&self) -> String {
        let mut output = String::with_capacity(self.lines.iter().map(|l| l.len() + 2).sum());
        for line in &self.lines {
            output.push_str(line);
            output.push_str(LINE_ENDING);
        }
        output
    }

    fn set_feed_rate(&mut self, rate: FeedRate) {
        if self.last_feed_rate == Some(rate) {
            return;
        }
        let value = format_value(self.feed_rates.get(rate));
        self.add(format!("F{} ; {}", value, rate), None);
        self.last_feed_rate = Some(rate);
    }

    fn add(&mut self, mut line: String, comment: Option<&str>) {
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            line.push_str(" ; ");
            line.push_str(comment);
        }
        trace!("{}", line);
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> MotionWriter {
        MotionWriter::new(FeedRates::new(35.0, 800.0), Coordinates::new(85.0, 85.0, 5.0))
    }

    #[test]
    fn test_new_declares_standard_rate() {
        let w = writer();
        assert_eq!(w.lines(), ["F35 ; standard"]);
        assert_eq!(w.last_feed_rate(), Some(FeedRate::Standard));
        assert_eq!(w.current_coordinates(), Coordinates::default());
    }

    #[test]
    fn test_same_rate_is_declared_once() {
        let mut w = writer();
        w.feed(PartialPosition::y_only(1.0), None).unwrap();
        w.feed(PartialPosition::y_only(2.0), None).unwrap();
        assert_eq!(w.lines(), ["F35 ; standard", "G1 Y1", "G1 Y2"]);
    }

    #[test]
    fn test_rate_switch_emits_single_declaration() {
        let mut w = writer();
        w.rapid(PartialPosition::x_only(1.0), None).unwrap();
        w.rapid(PartialPosition::x_only(2.0), None).unwrap();
        w.feed(PartialPosition::x_only(3.0), None).unwrap();
        assert_eq!(
            w.lines(),
            [
                "F35 ; standard",
                "F800 ; rapid",
                "G0 X1",
                "G0 X2",
                "F35 ; standard",
                "G1 X3"
            ]
        );
    }

    #[test]
    fn test_position_memory() {
        let mut w = writer();
        w.feed(PartialPosition::xyz(1.0, 2.0, 3.0), None).unwrap();
        w.feed(PartialPosition::y_only(9.0), None).unwrap();
        assert_eq!(w.current_coordinates(), Coordinates::new(1.0, 9.0, 3.0));
    }

    #[test]
    fn test_coordinates_are_a_snapshot() {
        let mut w = writer();
        w.feed(PartialPosition::x_only(1.0), None).unwrap();
        let before = w.current_coordinates();
        w.feed(PartialPosition::x_only(2.0), None).unwrap();
        assert_eq!(before.x, 1.0);
        assert_eq!(w.current_coordinates().x, 2.0);
    }

    #[test]
    fn test_axis_order_is_fixed() {
        let mut w = writer();
        let pos = PartialPosition {
            z: Some(-0.625),
            x: Some(4.375),
            y: None,
        };
        w.rapid(pos, None).unwrap();
        assert_eq!(w.lines().last().unwrap(), "G0 X4.375 Z-0.625");
    }

    #[test]
    fn test_comment_is_appended() {
        let mut w = writer();
        w.feed(PartialPosition::y_only(11.925), Some("Trim")).unwrap();
        assert_eq!(w.lines().last().unwrap(), "G1 Y11.925 ; Trim");
    }

    #[test]
    fn test_empty_comment_is_ignored() {
        let mut w = writer();
        w.wait_for_user(Some(""));
        assert_eq!(w.lines().last().unwrap(), "M0");
    }

    #[test]
    fn test_unknown_rate_appends_nothing() {
        let mut w = writer();
        let before = w.lines().to_vec();
        let err = w
            .move_named(PartialPosition::x_only(1.0), "plunge", None)
            .unwrap_err();
        assert_eq!(err, CoreError::UnknownFeedRate("plunge".to_string()));
        assert_eq!(w.lines(), before.as_slice());
        assert_eq!(w.current_coordinates(), Coordinates::default());
    }

    #[test]
    fn test_empty_position_is_rejected() {
        let mut w = writer();
        let err = w.rapid(PartialPosition::new(), None).unwrap_err();
        assert_eq!(err, CoreError::EmptyPosition);
        assert_eq!(w.lines(), ["F35 ; standard"]);
        assert_eq!(w.last_feed_rate(), Some(FeedRate::Standard));
    }

    #[test]
    fn test_rotate_leaves_linear_state_alone() {
        let mut w = writer();
        w.rapid(PartialPosition::x_only(1.0), None).unwrap();
        w.rotate(23.5);
        assert_eq!(w.lines().last().unwrap(), "G1 A23.5 ; Rotate 23.5");
        assert_eq!(w.last_feed_rate(), Some(FeedRate::Rapid));
        assert_eq!(w.current_coordinates(), Coordinates::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_move_to_safety_retracts_first() {
        let mut w = writer();
        w.move_to_safety().unwrap();
        assert_eq!(
            w.lines(),
            [
                "F35 ; standard",
                "F800 ; rapid",
                "G0 Z5 ; Safe height",
                "G0 X85 Y85 ; Moving to safe location"
            ]
        );
        assert_eq!(w.current_coordinates(), Coordinates::new(85.0, 85.0, 5.0));
    }

    #[test]
    fn test_generate_uses_crlf() {
        let mut w = writer();
        w.wait_for_user(Some("Flip"));
        assert_eq!(w.generate(), "F35 ; standard\r\nM0 ; Flip\r\n");
    }
}
