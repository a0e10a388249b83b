// ============================================================================
// Numeric Module
// Fixed-point arithmetic over big-endian 16-bit limbs
// ============================================================================
//
// This module provides:
// - FixedPoint: signed fixed-point value with sticky overflow
// - LimbLayout: total/integer limb counts shared by one computation
// - RatioConfig: precision bounds for big-integer ratio conversion
// - NumericError: Error types for construction and extraction
//
// Design principles:
// - Layout is explicit data, never process-wide state
// - Arithmetic never fails on overflow; overflow is a flag on the result
// - Pure operations: operands are never mutated
// - Truncation only, no rounding modes

mod arithmetic;
mod errors;
mod fixed_point;
mod layout;
mod ratio;

pub use errors::{NumericError, NumericResult};
pub use fixed_point::FixedPoint;
pub use layout::{LimbLayout, RatioConfig};
