// ============================================================================
// Limb Layout and Ratio Configuration
// Explicit shape and precision settings threaded through every computation
// ============================================================================

use super::errors::{NumericError, NumericResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Limb Layout
// ============================================================================

/// Shape shared by every value taking part in one computation.
///
/// - `size`: total number of 16-bit limbs (`SZ`)
/// - `int_size`: leading limbs that hold the integer part (`INT_SZ`)
///
/// The remaining `size - int_size` limbs hold the fraction. Values built with
/// different layouts cannot be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLimbLayout"))]
pub struct LimbLayout {
    size: usize,
    int_size: usize,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawLimbLayout {
    size: usize,
    int_size: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLimbLayout> for LimbLayout {
    type Error = NumericError;

    fn try_from(raw: RawLimbLayout) -> NumericResult<Self> {
        Self::new(raw.size, raw.int_size)
    }
}

impl LimbLayout {
    /// Eight limbs with a single integer limb.
    pub const DEFAULT: Self = Self {
        size: 8,
        int_size: 1,
    };

    /// Create a layout, requiring `size >= int_size >= 1`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for any other shape.
    pub fn new(size: usize, int_size: usize) -> NumericResult<Self> {
        if int_size == 0 || size < int_size {
            tracing::debug!(size, int_size, "rejected limb layout");
            return Err(NumericError::InvalidArgument);
        }
        Ok(Self { size, int_size })
    }

    pub(crate) const fn new_unchecked(size: usize, int_size: usize) -> Self {
        Self { size, int_size }
    }

    /// Total limb count.
    #[inline]
    pub const fn size(self) -> usize {
        self.size
    }

    /// Integer limb count.
    #[inline]
    pub const fn int_size(self) -> usize {
        self.int_size
    }

    /// Fractional limb count.
    #[inline]
    pub const fn frac_size(self) -> usize {
        self.size - self.int_size
    }

    /// Weight of the least significant limb, `2^(-16 * frac_size)`.
    pub fn resolution(self) -> f64 {
        2f64.powi(-16 * self.frac_size() as i32)
    }
}

impl Default for LimbLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Ratio Configuration
// ============================================================================

/// Precision bounds for converting big-integer ratios into fixed-point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RatioConfig {
    /// Integer limbs in every converted value
    pub int_size: usize,

    /// Hard ceiling on total limbs, and upper bound for an explicit limb count
    pub max_size: usize,

    /// Significant limbs after which adaptive conversion stops
    pub min_significant_digits: usize,
}

impl RatioConfig {
    /// Create a configuration with the default bounds.
    pub fn new() -> Self {
        Self {
            int_size: 1,
            max_size: 100,
            min_significant_digits: 2,
        }
    }

    /// Builder method: Set integer limb count
    pub fn with_int_size(mut self, int_size: usize) -> Self {
        self.int_size = int_size;
        self
    }

    /// Builder method: Set total limb ceiling
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Builder method: Set adaptive stopping threshold
    pub fn with_min_significant_digits(mut self, digits: usize) -> Self {
        self.min_significant_digits = digits;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumericResult<()> {
        if self.int_size == 0 {
            return Err(NumericError::InvalidArgument);
        }

        // At least one fractional limb must fit under the ceiling
        if self.max_size <= self.int_size {
            return Err(NumericError::InvalidArgument);
        }

        if self.min_significant_digits == 0 {
            return Err(NumericError::InvalidArgument);
        }

        Ok(())
    }

    /// Check an explicit limb count against `(int_size, max_size]`.
    pub(crate) fn accepts_limb_count(&self, count: usize) -> bool {
        count > self.int_size && count <= self.max_size
    }
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_creation() {
        let layout = LimbLayout::new(8, 2).unwrap();
        assert_eq!(layout.size(), 8);
        assert_eq!(layout.int_size(), 2);
        assert_eq!(layout.frac_size(), 6);
        assert_eq!(LimbLayout::default(), LimbLayout::DEFAULT);
    }

    #[test]
    fn test_layout_validation() {
        assert_eq!(LimbLayout::new(4, 0), Err(NumericError::InvalidArgument));
        assert_eq!(LimbLayout::new(1, 2), Err(NumericError::InvalidArgument));
        assert!(LimbLayout::new(2, 2).is_ok());
    }

    #[test]
    fn test_layout_resolution() {
        let layout = LimbLayout::new(3, 1).unwrap();
        assert_eq!(layout.resolution(), 2f64.powi(-32));

        let int_only = LimbLayout::new(2, 2).unwrap();
        assert_eq!(int_only.resolution(), 1.0);
    }

    #[test]
    fn test_ratio_defaults() {
        let config = RatioConfig::default();
        assert_eq!(config.int_size, 1);
        assert_eq!(config.max_size, 100);
        assert_eq!(config.min_significant_digits, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ratio_builder_pattern() {
        let config = RatioConfig::new()
            .with_int_size(3)
            .with_max_size(40)
            .with_min_significant_digits(4);

        assert_eq!(config.int_size, 3);
        assert_eq!(config.max_size, 40);
        assert_eq!(config.min_significant_digits, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ratio_validation() {
        assert!(RatioConfig::new().with_int_size(0).validate().is_err());
        assert!(RatioConfig::new().with_max_size(1).validate().is_err());
        assert!(RatioConfig::new()
            .with_min_significant_digits(0)
            .validate()
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_layout_deserialize_validates() {
        let layout: LimbLayout = serde_json::from_str(r#"{"size":8,"int_size":2}"#).unwrap();
        assert_eq!(layout, LimbLayout::new(8, 2).unwrap());

        assert!(serde_json::from_str::<LimbLayout>(r#"{"size":0,"int_size":0}"#).is_err());
        assert!(serde_json::from_str::<LimbLayout>(r#"{"size":1,"int_size":2}"#).is_err());
    }

    #[test]
    fn test_explicit_limb_count_bounds() {
        let config = RatioConfig::default();
        assert!(!config.accepts_limb_count(1));
        assert!(config.accepts_limb_count(2));
        assert!(config.accepts_limb_count(100));
        assert!(!config.accepts_limb_count(101));
    }
}
