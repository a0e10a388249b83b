// ============================================================================
// Fixed-Limb Library
// Fixed-point arbitrary-precision arithmetic over 16-bit limbs
// ============================================================================

//! # Fixed-Limb
//!
//! Fixed-point numbers of caller-chosen precision, stored as big-endian
//! sequences of 16-bit limbs split into an integer part and a fraction.
//!
//! ## Features
//!
//! - **Explicit layouts**: total and integer limb counts travel with every value
//! - **Sticky overflow**: add/multiply never fail, they flag the result instead
//! - **Exact ratio conversion** from big-integer numerator/denominator pairs
//! - **Pluggable backends** so the same code runs on `f64` or fixed point
//!
//! ## Example
//!
//! ```rust
//! use fixed_limb::prelude::*;
//! use num_bigint::BigInt;
//!
//! let layout = LimbLayout::new(8, 2)?;
//!
//! // 18.125 * -34.5
//! let a = FixedPoint::from_int(layout, 18)?
//!     .checked_add(&FixedPoint::from_unit_fraction(layout, 0.125)?)?;
//! let b = FixedPoint::from_int(layout, 34)?
//!     .checked_add(&FixedPoint::from_unit_fraction(layout, 0.5)?)?
//!     .negate();
//! let product = a.checked_mul(&b)?;
//! assert_eq!(product.to_f64(), -625.3125);
//!
//! // Overflow is data, not control flow
//! let big = FixedPoint::from_int(layout, 0xffff_ffff)?;
//! let huge = big.checked_mul(&big)?;
//! assert!(huge.is_overflow());
//! assert_eq!(huge.to_f64(), f64::INFINITY);
//!
//! // Ratios pick their own size
//! let third = FixedPoint::from_ratio(
//!     &BigInt::from(100_000_000_000_000_000_000u128),
//!     &BigInt::from(300_000_000_000_000_000_000u128),
//!     Some(4),
//!     &RatioConfig::default(),
//! )?;
//! assert!((third.to_f64() - 1.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), NumericError>(())
//! ```

pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::interfaces::{Arithmetic, DoubleArithmetic, FixedPointArithmetic};
    pub use crate::numeric::{FixedPoint, LimbLayout, NumericError, NumericResult, RatioConfig};
}
