//! # RotaryMill Core
//!
//! Core value types for RotaryMill.
//! Provides the axis and position model used by the G-code writer,
//! the feed rate classes, and the stock/tool geometry the toolpath
//! generators are driven by.

pub mod data;
pub mod error;

pub use data::{
    format_value, Axis, Coordinates, EndMill, FeedRate, FeedRates, Fixture, PartialPosition,
    Stock,
};

pub use error::{CoreError, CoreResult};
