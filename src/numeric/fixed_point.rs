// ============================================================================
// Fixed-Point Value
// Signed fixed-point number stored as big-endian 16-bit limbs
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::layout::LimbLayout;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limb storage. Eight limbs stay inline, longer values spill to the heap.
pub(crate) type Limbs = SmallVec<[u16; 8]>;

/// Fixed-point number with a runtime-chosen limb layout.
///
/// The value is `limbs[0..int_size]` read as a big-endian base-65536 integer,
/// plus `limbs[p] * 2^(-16 * (p - int_size + 1))` for every fractional limb
/// `p >= int_size`.
///
/// Sign and overflow live beside the limbs rather than inside them, so every
/// magnitude algorithm works directly on the unsigned limb sequence.
///
/// # Overflow
/// Overflow is sticky. Once set, the limbs are stale and every operation
/// consuming the value returns an overflowed result. It turns into an error
/// only at [`FixedPoint::to_int`]; [`FixedPoint::to_f64`] reports infinity.
///
/// # Example
/// ```
/// use fixed_limb::numeric::{FixedPoint, LimbLayout};
///
/// let layout = LimbLayout::new(4, 1)?;
/// let a = FixedPoint::from_int(layout, 3)?;
/// let b = FixedPoint::from_unit_fraction(layout, 0.25)?;
/// let sum = a.checked_add(&b)?;
/// assert_eq!(sum.to_f64(), 3.25);
/// # Ok::<(), fixed_limb::numeric::NumericError>(())
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFixedPoint"))]
pub struct FixedPoint {
    limbs: Limbs,
    int_size: usize,
    negative: bool,
    overflow: bool,
}

/// Unchecked wire form; shape is validated before it becomes a `FixedPoint`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawFixedPoint {
    limbs: Limbs,
    int_size: usize,
    negative: bool,
    overflow: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFixedPoint> for FixedPoint {
    type Error = NumericError;

    fn try_from(raw: RawFixedPoint) -> NumericResult<Self> {
        LimbLayout::new(raw.limbs.len(), raw.int_size)?;
        Ok(Self::from_parts(
            raw.limbs,
            raw.int_size,
            raw.negative,
            raw.overflow,
        ))
    }
}

impl FixedPoint {
    // ========================================================================
    // Construction
    // ========================================================================

    pub(crate) fn from_parts(limbs: Limbs, int_size: usize, negative: bool, overflow: bool) -> Self {
        debug_assert!(int_size >= 1 && limbs.len() >= int_size);
        Self {
            limbs,
            int_size,
            negative,
            overflow,
        }
    }

    /// Positive zero.
    pub fn zero(layout: LimbLayout) -> Self {
        Self::from_parts(smallvec![0; layout.size()], layout.int_size(), false, false)
    }

    /// Largest representable magnitude: every limb set to `0xFFFF`.
    pub fn max_positive(layout: LimbLayout) -> Self {
        Self::from_parts(
            smallvec![0xffff; layout.size()],
            layout.int_size(),
            false,
            false,
        )
    }

    /// One unit in the least significant limb.
    pub fn smallest_fraction(layout: LimbLayout) -> Self {
        let mut value = Self::zero(layout);
        value.limbs[layout.size() - 1] = 1;
        value
    }

    /// Create from a non-negative integer.
    ///
    /// Only the two least significant integer limbs are populated: the low
    /// 16 bits land in limb `int_size - 1` and the next 16 bits in limb
    /// `int_size - 2` when it exists. Anything above bit 31 is dropped, and
    /// with a single integer limb only the low 16 bits survive.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `x` is negative.
    pub fn from_int(layout: LimbLayout, x: i64) -> NumericResult<Self> {
        if x < 0 {
            tracing::debug!(x, "rejected negative integer");
            return Err(NumericError::InvalidArgument);
        }

        let mut value = Self::zero(layout);
        let low = layout.int_size() - 1;
        value.limbs[low] = (x & 0xffff) as u16;
        if low >= 1 {
            value.limbs[low - 1] = ((x >> 16) & 0xffff) as u16;
        }
        Ok(value)
    }

    /// Create from a fraction in `[0, 1]`.
    ///
    /// Bits are chosen greedily, most significant first, against a unit that
    /// halves at every step. Filling stops the moment the remainder is used
    /// up, so limbs past the last needed bit stay zero. `1.0` itself sets every
    /// fractional bit, leaving the integer limbs at zero.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `x` is outside `[0, 1]` or NaN.
    pub fn from_unit_fraction(layout: LimbLayout, x: f64) -> NumericResult<Self> {
        if !(0.0..=1.0).contains(&x) {
            tracing::debug!(x, "rejected fraction outside [0, 1]");
            return Err(NumericError::InvalidArgument);
        }

        let mut value = Self::zero(layout);
        let mut rest = x;
        let mut unit = 1.0;
        'limbs: for limb in value.limbs[layout.int_size()..].iter_mut() {
            for bit in (0..16).rev() {
                unit /= 2.0;
                if rest >= unit {
                    *limb |= 1 << bit;
                    rest -= unit;
                    if rest <= 0.0 {
                        break 'limbs;
                    }
                }
            }
        }
        Ok(value)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shape of this value.
    #[inline]
    pub fn layout(&self) -> LimbLayout {
        LimbLayout::new_unchecked(self.limbs.len(), self.int_size)
    }

    /// Magnitude limbs, most significant first.
    #[inline]
    pub fn limbs(&self) -> &[u16] {
        &self.limbs
    }

    #[inline]
    pub(crate) fn int_size(&self) -> usize {
        self.int_size
    }

    /// Check if the magnitude is zero, regardless of sign.
    #[inline]
    pub fn is_zero(&self) -> bool {
        !self.overflow && self.limbs.iter().all(|&limb| limb == 0)
    }

    // ========================================================================
    // Flags
    // ========================================================================

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_overflow(&self) -> bool {
        self.overflow
    }

    #[inline]
    pub fn set_negative(&mut self) {
        self.negative = true;
    }

    /// Mark the value as overflowed. There is no way to clear it again.
    #[inline]
    pub fn set_overflow(&mut self) {
        self.overflow = true;
    }

    /// Read and clear the negative flag, leaving a plain magnitude behind.
    #[inline]
    pub fn take_negative(&mut self) -> bool {
        std::mem::take(&mut self.negative)
    }

    /// Same magnitude, opposite sign.
    pub fn negate(&self) -> Self {
        let mut value = self.clone();
        value.negative = !value.negative;
        value
    }

    /// Same magnitude, positive sign.
    pub fn abs(&self) -> Self {
        let mut value = self.clone();
        value.negative = false;
        value
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    /// Convert to `f64`, returning signed infinity when overflowed.
    pub fn to_f64(&self) -> f64 {
        if self.overflow {
            return if self.negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }

        let top = self.int_size as i32 - 1;
        let magnitude: f64 = self
            .limbs
            .iter()
            .enumerate()
            .map(|(i, &limb)| f64::from(limb) * 65536f64.powi(top - i as i32))
            .sum();

        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Read back the integer part the way [`FixedPoint::from_int`] stored it.
    ///
    /// Uses at most the two least significant integer limbs. The fraction is
    /// ignored, so the result truncates toward zero.
    ///
    /// # Errors
    /// Returns `Overflow` if the overflow flag is set.
    pub fn to_int(&self) -> NumericResult<i64> {
        if self.overflow {
            return Err(NumericError::Overflow);
        }

        let low = self.int_size - 1;
        let mut x = i64::from(self.limbs[low]);
        if low >= 1 {
            x += i64::from(self.limbs[low - 1]) << 16;
        }

        Ok(if self.negative { -x } else { x })
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for FixedPoint {
    /// Zero compares equal whatever its sign. Overflowed values compare
    /// equal to each other when their signs agree, ignoring stale limbs.
    fn eq(&self, other: &Self) -> bool {
        if self.int_size != other.int_size || self.limbs.len() != other.limbs.len() {
            return false;
        }
        if self.overflow || other.overflow {
            return self.overflow == other.overflow && self.negative == other.negative;
        }
        self.limbs == other.limbs && (self.negative == other.negative || self.is_zero())
    }
}

impl Eq for FixedPoint {}

impl Neg for FixedPoint {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self::Output {
        self.negative = !self.negative;
        self
    }
}

impl Neg for &FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

fn write_limbs(f: &mut fmt::Formatter<'_>, limbs: &[u16]) -> fmt::Result {
    for (i, limb) in limbs.iter().enumerate() {
        if i > 0 {
            write!(f, "_")?;
        }
        write!(f, "{:04x}", limb)?;
    }
    Ok(())
}

impl fmt::Display for FixedPoint {
    /// Hexadecimal limbs, e.g. `-0x0012.2000_0000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        if self.overflow {
            return write!(f, "overflow");
        }

        write!(f, "0x")?;
        write_limbs(f, &self.limbs[..self.int_size])?;
        if self.limbs.len() > self.int_size {
            write!(f, ".")?;
            write_limbs(f, &self.limbs[self.int_size..])?;
        }
        Ok(())
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedPoint<{},{}>({}, approx={})",
            self.limbs.len(),
            self.int_size,
            self,
            self.to_f64()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
