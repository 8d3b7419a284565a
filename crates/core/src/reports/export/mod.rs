//! Export serializers for summary rows.
//!
//! Both exporters consume the same row sequence and build the whole document
//! in memory before returning, so a payload is either complete or absent.

pub mod csv;

// Page geometry is f32 millimetres; money never enters float math here
// (totals are formatted from Decimal before drawing).
#[allow(clippy::float_arithmetic)]
pub mod pdf;
