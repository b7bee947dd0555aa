use rotarymill_camtools::MotionWriter;
use rotarymill_core::{Axis, Coordinates, FeedRate, FeedRates, PartialPosition};

fn writer() -> MotionWriter {
    MotionWriter::new(FeedRates::new(500.0, 800.0), Coordinates::new(10.0, 20.0, 30.0))
}

#[test]
fn test_safety_retract_is_vertical_first() {
    let mut w = writer();
    w.feed(PartialPosition::xyz(1.0, 2.0, -3.0), None).unwrap();
    w.move_to_safety().unwrap();

    let lines = w.lines();
    let z_only = lines.iter().position(|l| l == "G0 Z30 ; Safe height").unwrap();
    let xy = lines
        .iter()
        .position(|l| l == "G0 X10 Y20 ; Moving to safe location")
        .unwrap();
    assert!(z_only < xy);
    assert_eq!(xy, z_only + 1);
}

#[test]
fn test_rate_declared_once_per_class_change() {
    let mut w = writer();
    let rates = [
        FeedRate::Standard,
        FeedRate::Standard,
        FeedRate::Rapid,
        FeedRate::Rapid,
        FeedRate::Rapid,
        FeedRate::Standard,
    ];
    for (i, rate) in rates.iter().enumerate() {
        w.move_to(PartialPosition::x_only(i as f64), *rate, None)
            .unwrap();
    }

    let declarations: Vec<&String> = w.lines().iter().filter(|l| l.starts_with('F')).collect();
    assert_eq!(
        declarations,
        vec!["F500 ; standard", "F800 ; rapid", "F500 ; standard"]
    );
    assert_eq!(w.lines().len(), 3 + rates.len());
}

#[test]
fn test_partial_moves_track_absolute_position() {
    let mut w = writer();
    w.rapid(PartialPosition::new().with(Axis::Z, 5.0).with(Axis::X, 1.0), None)
        .unwrap();
    w.feed(PartialPosition::y_only(-4.0), Some("Cut")).unwrap();

    assert_eq!(w.current_coordinates(), Coordinates::new(1.0, -4.0, 5.0));
    assert!(w.generate().contains("G0 X1 Z5\r\nF500 ; standard\r\nG1 Y-4 ; Cut\r\n"));
}
