// ============================================================================
// Ratio Conversion
// Big-integer long division into fixed-point limbs
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::fixed_point::{FixedPoint, Limbs};
use super::layout::RatioConfig;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;
use rust_decimal::Decimal;

impl FixedPoint {
    /// Convert `numerator / denominator` into a fixed-point value.
    ///
    /// The result always has `config.int_size` integer limbs. Its total size
    /// depends on `explicit_limb_count`:
    /// - `Some(n)`: exactly `n` limbs, even if that truncates significant bits
    /// - `None`: limbs are emitted until `config.min_significant_digits`
    ///   significant limbs have been produced, with at least one fractional
    ///   limb and never more than `config.max_size` limbs in total
    ///
    /// A limb counts as significant once it, or any limb before it, is
    /// nonzero. The sign comes from the numerator.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the denominator is not positive, the
    /// explicit limb count is outside `(int_size, max_size]`, or the
    /// configuration is invalid.
    ///
    /// # Example
    /// ```
    /// use fixed_limb::numeric::{FixedPoint, RatioConfig};
    /// use num_bigint::BigInt;
    ///
    /// let x = FixedPoint::from_ratio(
    ///     &BigInt::from(5_123_000_000u64),
    ///     &BigInt::from(1_000_000u32),
    ///     None,
    ///     &RatioConfig::default(),
    /// )?;
    /// assert_eq!(x.layout().size(), 2);
    /// assert_eq!(x.to_f64(), 5123.0);
    /// # Ok::<(), fixed_limb::numeric::NumericError>(())
    /// ```
    pub fn from_ratio(
        numerator: &BigInt,
        denominator: &BigInt,
        explicit_limb_count: Option<usize>,
        config: &RatioConfig,
    ) -> NumericResult<Self> {
        config.validate()?;

        if denominator.sign() != Sign::Plus {
            tracing::debug!(%denominator, "rejected non-positive denominator");
            return Err(NumericError::InvalidArgument);
        }
        if let Some(count) = explicit_limb_count {
            if !config.accepts_limb_count(count) {
                tracing::debug!(count, ?config, "rejected explicit limb count");
                return Err(NumericError::InvalidArgument);
            }
        }

        let negative = numerator.sign() == Sign::Minus;
        let (int_part, mut remainder) = numerator.magnitude().div_rem(denominator.magnitude());

        // Integer limbs, counted from the least significant end
        let words = int_part.to_u32_digits();
        let int_digit = |k: usize| -> u16 {
            words
                .get(k / 2)
                .map_or(0, |word| (word >> (16 * (k % 2))) as u16)
        };

        let mut significant_int = 0;
        for k in 0..config.int_size {
            if int_digit(k) != 0 {
                significant_int = k + 1;
            }
        }

        let mut limbs: Limbs = (0..config.int_size).rev().map(int_digit).collect();

        // Fractional limbs: one bit per halving of the denominator
        let mut unit = denominator.magnitude().clone();
        let mut significant_frac = 0;
        for _ in config.int_size..config.max_size {
            let mut digit = 0u16;
            if !unit.is_zero() {
                for bit in (0..16).rev() {
                    unit >>= 1u32;
                    if unit.is_zero() {
                        break;
                    }
                    if remainder >= unit {
                        digit |= 1 << bit;
                        remainder -= &unit;
                    }
                }
            }
            limbs.push(digit);

            if digit != 0 || significant_int > 0 || significant_frac > 0 {
                significant_frac += 1;
            }

            let done = match explicit_limb_count {
                Some(count) => limbs.len() >= count,
                None => significant_int + significant_frac >= config.min_significant_digits,
            };
            if done {
                break;
            }
        }

        tracing::debug!(
            limbs = limbs.len(),
            int_size = config.int_size,
            negative,
            "converted ratio to fixed point"
        );

        Ok(Self::from_parts(limbs, config.int_size, negative, false))
    }

    /// Convert a decimal into a fixed-point value.
    ///
    /// This is intended for API boundaries (parsing user input). The decimal
    /// is read as the ratio `mantissa / 10^scale`, with both sides scaled by
    /// `2^(16 * max_size)` so that every denominator halving in
    /// [`FixedPoint::from_ratio`] is exact.
    ///
    /// # Errors
    /// Same as [`FixedPoint::from_ratio`].
    pub fn from_decimal(
        d: Decimal,
        explicit_limb_count: Option<usize>,
        config: &RatioConfig,
    ) -> NumericResult<Self> {
        let shift = 16 * config.max_size;
        let numerator = BigInt::from(d.mantissa()) << shift;
        let denominator = BigInt::from(10u32).pow(d.scale()) << shift;
        Self::from_ratio(&numerator, &denominator, explicit_limb_count, config)
    }
}

// ============================================================================
// Tests
// ============================================================================
