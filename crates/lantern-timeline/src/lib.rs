//! Dense timeline reconstruction and violation windowing.
//!
//! Turns sparse per-signal change histories into a dense table with
//! last-value-hold semantics, selects the rows around known violation
//! times, and serializes the result as CSV text for analysis.

pub mod csv;
pub mod reconstruct;
pub mod window;

pub use csv::render_csv;
pub use reconstruct::Timeline;
pub use window::select_rows;
