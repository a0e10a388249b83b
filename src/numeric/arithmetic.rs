// ============================================================================
// Limb Arithmetic
// Magnitude comparison, carry/borrow addition and fixed-point multiplication
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_point::{FixedPoint, Limbs};
use smallvec::smallvec;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

impl FixedPoint {
    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare magnitudes, ignoring sign and overflow.
    ///
    /// Limbs are compared from the most significant end; the first differing
    /// limb decides. Equal magnitudes give `false`.
    pub fn abs_gt(&self, other: &Self) -> bool {
        for (a, b) in self.limbs().iter().zip(other.limbs()) {
            if a != b {
                return a > b;
            }
        }
        false
    }

    fn ensure_same_layout(&self, rhs: &Self) -> NumericResult<()> {
        if self.layout() != rhs.layout() {
            tracing::debug!(
                lhs = ?self.layout(),
                rhs = ?rhs.layout(),
                "rejected operands with different layouts"
            );
            return Err(NumericError::LayoutMismatch);
        }
        Ok(())
    }

    /// Result of an operation with an overflowed operand: `self`, flagged.
    fn sticky_overflow(&self, rhs: &Self) -> Option<Self> {
        if self.is_overflow() || rhs.is_overflow() {
            let mut value = self.clone();
            value.set_overflow();
            Some(value)
        } else {
            None
        }
    }

    // ========================================================================
    // Addition
    // ========================================================================

    /// Signed addition.
    ///
    /// Equal signs add magnitudes with carry; a carry out of the most
    /// significant limb sets overflow. Opposite signs subtract the smaller
    /// magnitude from the larger and take the larger operand's sign. Equal
    /// magnitudes give zero carrying `rhs`'s sign.
    ///
    /// An overflowed operand makes the result overflowed without touching
    /// the limbs.
    ///
    /// # Errors
    /// Returns `LayoutMismatch` if the operands have different layouts.
    /// Overflow is never an error here.
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_layout(rhs)?;
        if let Some(value) = self.sticky_overflow(rhs) {
            return Ok(value);
        }

        let a = self.limbs();
        let b = rhs.limbs();
        let mut c: Limbs = smallvec![0; a.len()];

        if self.is_negative() == rhs.is_negative() {
            let mut carry = 0u32;
            for i in (0..a.len()).rev() {
                let sum = u32::from(a[i]) + u32::from(b[i]) + carry;
                c[i] = (sum & 0xffff) as u16;
                carry = sum >> 16;
            }

            let overflow = carry != 0;
            if overflow {
                tracing::trace!(negative = self.is_negative(), "addition overflowed");
            }
            return Ok(Self::from_parts(
                c,
                self.int_size(),
                self.is_negative(),
                overflow,
            ));
        }

        let (minuend, subtrahend) = if self.abs_gt(rhs) {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut borrow = 0i32;
        for i in (0..a.len()).rev() {
            let diff = i32::from(minuend.limbs()[i]) - i32::from(subtrahend.limbs()[i]) - borrow;
            c[i] = (diff & 0xffff) as u16;
            borrow = i32::from(diff < 0);
        }

        Ok(Self::from_parts(
            c,
            self.int_size(),
            minuend.is_negative(),
            false,
        ))
    }

    /// Signed subtraction, `self + (-rhs)`.
    ///
    /// # Errors
    /// Returns `LayoutMismatch` if the operands have different layouts.
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        self.checked_add(&rhs.negate())
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Signed fixed-point multiplication.
    ///
    /// Schoolbook product where `a[i] * b[j]` lands in output limb
    /// `i + j - int_size + 1`, keeping the binary point after limb
    /// `int_size - 1`. Anything landing above limb 0 sets overflow.
    ///
    /// Contributions below the last limb are truncated. Each row carries the
    /// high half of its own tail product upward, but tail sums are never
    /// combined across rows, so the last limb can come out slightly low.
    ///
    /// # Errors
    /// Returns `LayoutMismatch` if the operands have different layouts.
    /// Overflow is never an error here.
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        self.ensure_same_layout(rhs)?;
        Ok(self.mul_same_layout(rhs))
    }

    /// `self * self`.
    pub fn square(&self) -> Self {
        self.mul_same_layout(self)
    }

    fn mul_same_layout(&self, rhs: &Self) -> Self {
        if let Some(value) = self.sticky_overflow(rhs) {
            return value;
        }

        let negative = self.is_negative() != rhs.is_negative();
        let a = self.limbs();
        let b = rhs.limbs();
        let size = a.len() as isize;
        let int_size = self.int_size() as isize;
        let mut c: Limbs = smallvec![0; a.len()];

        for i in (0..size).rev() {
            let a_i = u64::from(a[i as usize]);
            let mut carry = 0u64;

            for c_ix in (-int_size..=(2 * size - 1 - int_size)).rev() {
                let j = c_ix - i + int_size - 1;

                let mut product = carry;
                if (0..size).contains(&j) {
                    product += a_i * u64::from(b[j as usize]);
                }

                if product == 0 {
                    carry = 0;
                    continue;
                }

                if c_ix < 0 {
                    carry = 1;
                    break;
                }

                if c_ix >= size {
                    // Below resolution: keep the carry, drop the low bits
                    carry = product >> 16;
                    continue;
                }

                let total = u64::from(c[c_ix as usize]) + product;
                c[c_ix as usize] = (total & 0xffff) as u16;
                carry = total >> 16;
            }

            if carry != 0 {
                tracing::trace!(negative, row = i, "multiplication overflowed");
                return Self::from_parts(c, self.int_size(), negative, true);
            }
        }

        Self::from_parts(c, self.int_size(), negative, false)
    }
}

// ============================================================================
// Operator Implementations
// ============================================================================

// Infallible operators for ergonomics (panic on layout mismatch - use checked_* otherwise)
impl Add for &FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("FixedPoint addition layout mismatch")
    }
}

impl Add for FixedPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl Sub for &FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .expect("FixedPoint subtraction layout mismatch")
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl Mul for &FixedPoint {
    type Output = FixedPoint;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
            .expect("FixedPoint multiplication layout mismatch")
    }
}

impl Mul for FixedPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl AddAssign<&FixedPoint> for FixedPoint {
    #[inline]
    fn add_assign(&mut self, rhs: &FixedPoint) {
        *self = &*self + rhs;
    }
}

impl MulAssign<&FixedPoint> for FixedPoint {
    #[inline]
    fn mul_assign(&mut self, rhs: &FixedPoint) {
        *self = &*self * rhs;
    }
}

// ============================================================================
// Tests
// ============================================================================
