//! VCD trace reading for the violation diagnostic pipeline.
//!
//! Parses IEEE 1364 Value Change Dump files into per-signal change
//! histories keyed by hierarchical signal name, with all timestamps
//! normalized to picoseconds.

pub mod value;
pub mod vcd;

pub use value::SignalValue;
pub use vcd::{TraceError, VcdTrace};
