// ============================================================================
// Arithmetic Backend Interface
// Defines the contract for pluggable numeric backends
// ============================================================================

use crate::numeric::{FixedPoint, LimbLayout, NumericResult};

/// Strategy pattern interface for numeric backends.
/// Implementations: f64 (fast, 53-bit) and FixedPoint (layout-sized precision).
///
/// Generic code written against this trait runs unchanged on either backend,
/// which makes it easy to check a fixed-point computation against a float
/// reference.
pub trait Arithmetic {
    /// Number type produced by this backend
    type Value: Clone;

    /// Additive identity
    fn zero(&self) -> Self::Value;

    /// Convert a signed integer
    fn from_int(&self, x: i32) -> NumericResult<Self::Value>;

    fn add(&self, a: &Self::Value, b: &Self::Value) -> NumericResult<Self::Value>;

    fn sub(&self, a: &Self::Value, b: &Self::Value) -> NumericResult<Self::Value>;

    fn mul(&self, a: &Self::Value, b: &Self::Value) -> NumericResult<Self::Value>;

    /// Approximate value as `f64`
    fn to_f64(&self, a: &Self::Value) -> f64;

    /// Get the backend name for logging
    fn name(&self) -> &str;

    /// Optional: `a * a`
    fn sqr(&self, a: &Self::Value) -> NumericResult<Self::Value> {
        self.mul(a, a)
    }

    /// Optional: `2 * a * b`
    fn twice_mul(&self, a: &Self::Value, b: &Self::Value) -> NumericResult<Self::Value> {
        let product = self.mul(a, b)?;
        self.add(&product, &product)
    }
}

/// Native `f64` backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleArithmetic;

impl Arithmetic for DoubleArithmetic {
    type Value = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn from_int(&self, x: i32) -> NumericResult<f64> {
        Ok(f64::from(x))
    }

    fn add(&self, a: &f64, b: &f64) -> NumericResult<f64> {
        Ok(a + b)
    }

    fn sub(&self, a: &f64, b: &f64) -> NumericResult<f64> {
        Ok(a - b)
    }

    fn mul(&self, a: &f64, b: &f64) -> NumericResult<f64> {
        Ok(a * b)
    }

    fn to_f64(&self, a: &f64) -> f64 {
        *a
    }

    fn name(&self) -> &str {
        "f64"
    }
}

/// Fixed-point backend bound to one layout.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointArithmetic {
    layout: LimbLayout,
}

impl FixedPointArithmetic {
    pub fn new(layout: LimbLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> LimbLayout {
        self.layout
    }
}

impl Arithmetic for FixedPointArithmetic {
    type Value = FixedPoint;

    fn zero(&self) -> FixedPoint {
        FixedPoint::zero(self.layout)
    }

    fn from_int(&self, x: i32) -> NumericResult<FixedPoint> {
        let magnitude = FixedPoint::from_int(self.layout, i64::from(x).abs())?;
        Ok(if x < 0 { magnitude.negate() } else { magnitude })
    }

    fn add(&self, a: &FixedPoint, b: &FixedPoint) -> NumericResult<FixedPoint> {
        a.checked_add(b)
    }

    fn sub(&self, a: &FixedPoint, b: &FixedPoint) -> NumericResult<FixedPoint> {
        a.checked_sub(b)
    }

    fn mul(&self, a: &FixedPoint, b: &FixedPoint) -> NumericResult<FixedPoint> {
        a.checked_mul(b)
    }

    fn to_f64(&self, a: &FixedPoint) -> f64 {
        a.to_f64()
    }

    fn name(&self) -> &str {
        "fixed-point"
    }
}
