//! Long randomized runs: ratio conversion against f64 division, and chained
//! arithmetic against an f64 reference.

use fixed_limb::numeric::{FixedPoint, LimbLayout, RatioConfig};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

const TWO_POW_32: f64 = 4_294_967_296.0;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_f1ed)
}

/// Random integer with exactly `digits` decimal digits.
fn next_big_int(rng: &mut StdRng, digits: usize, negative: bool) -> BigInt {
    let mut s = String::with_capacity(digits + 1);
    if negative {
        s.push('-');
    }
    s.push(char::from(b'0' + rng.gen_range(1..10u8)));
    for _ in 1..digits {
        s.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    BigInt::from_str(&s).unwrap()
}

fn ratio_f64(p: &BigInt, q: &BigInt) -> f64 {
    p.to_f64().unwrap() / q.to_f64().unwrap()
}

/// `int + frac` with an optional sign, in the given layout.
fn operand(layout: LimbLayout, int: i64, frac: f64, negative: bool) -> FixedPoint {
    let x = FixedPoint::from_int(layout, int)
        .unwrap()
        .checked_add(&FixedPoint::from_unit_fraction(layout, frac).unwrap())
        .unwrap();
    if negative {
        x.negate()
    } else {
        x
    }
}

// ============================================================================
// Ratio Conversion
// ============================================================================

#[test]
fn test_ratio_default_size() {
    let mut rng = rng();
    let config = RatioConfig::default();

    for _ in 0..2_000 {
        let mag_offset = rng.gen_range(8..100);
        let mag_bound = mag_offset + 4;
        let p_digits = rng.gen_range(mag_offset..mag_bound);
        let p_negative = rng.gen();
        let p = next_big_int(&mut rng, p_digits, p_negative);
        let q_digits = rng.gen_range(mag_offset..mag_bound);
        let q = next_big_int(&mut rng, q_digits, false);

        let a = FixedPoint::from_ratio(&p, &q, None, &config).unwrap();
        let expected = ratio_f64(&p, &q);
        assert!(
            (a.to_f64() - expected).abs() <= 1e-4,
            "{} / {}: expected {}, got {}",
            p,
            q,
            expected,
            a.to_f64()
        );
    }
}

#[test]
fn test_ratio_defined_size() {
    let mut rng = rng();

    for _ in 0..2_000 {
        let int_size = rng.gen_range(10..20);
        let size = int_size + rng.gen_range(10..20);
        let config = RatioConfig::default().with_int_size(int_size);

        let mag_offset = rng.gen_range(15..100);
        let mag_bound = mag_offset + 15;
        let p_digits = rng.gen_range(mag_offset..mag_bound);
        let p_negative = rng.gen();
        let p = next_big_int(&mut rng, p_digits, p_negative);
        let q_digits = rng.gen_range(mag_offset..mag_bound);
        let q = next_big_int(&mut rng, q_digits, false);

        let a = FixedPoint::from_ratio(&p, &q, Some(size), &config).unwrap();
        assert_eq!(a.layout().size(), size);
        assert_eq!(a.layout().int_size(), int_size);

        let expected = ratio_f64(&p, &q);
        assert!(
            (a.to_f64() - expected).abs() <= expected.abs() * 1e-10,
            "{} / {}: expected {}, got {}",
            p,
            q,
            expected,
            a.to_f64()
        );
    }
}

// ============================================================================
// Chained Arithmetic
// ============================================================================

#[test]
fn test_sustained_accumulation() {
    let mut rng = rng();
    let layout = LimbLayout::new(8, 2).unwrap();

    let mut a = operand(layout, 1, 0.125, false);
    let mut expected: f64 = 1.125;

    let iterations = 1_000;
    let start_delta = 0.00001;
    let end_delta = 0.002;

    for i in 0..iterations {
        if expected.abs() > f64::from(0x10_0000) {
            // Shrink before the integer part runs out
            let b = f64::from(rng.gen::<f32>()) * 0.0078125;
            let negative = rng.gen::<bool>();
            a = a.checked_mul(&operand(layout, 0, b, negative)).unwrap();
            expected *= if negative { -b } else { b };
        } else if rng.gen::<bool>() {
            let int = rng.gen_range(0..0x1a);
            let frac = f64::from(rng.gen::<f32>());
            let negative = rng.gen::<bool>();
            a = a.checked_mul(&operand(layout, int, frac, negative)).unwrap();
            let b = int as f64 + frac;
            expected *= if negative { -b } else { b };
        } else {
            let int = rng.gen_range(0..0x1000);
            let frac = f64::from(rng.gen::<f32>());
            let negative = rng.gen::<bool>();
            a = a.checked_add(&operand(layout, int, frac, negative)).unwrap();
            let b = int as f64 + frac;
            expected += if negative { -b } else { b };
        }

        assert!(!a.is_overflow(), "iteration {}", i);
        if expected == 0.0 {
            assert_eq!(a.to_f64(), 0.0, "iteration {}", i);
        } else {
            let delta = start_delta + (end_delta - start_delta) * (i as f64 / iterations as f64);
            assert!(
                (a.to_f64() - expected).abs() <= delta * expected.abs().max(1.0),
                "iteration {}: expected {}, got {}",
                i,
                expected,
                a.to_f64()
            );
        }
    }
}

#[test]
fn test_add_positive_to_overflow() {
    let mut rng = rng();
    let layout = LimbLayout::new(8, 2).unwrap();

    let mut a = operand(layout, rng.gen_range(0..0x1a), f64::from(rng.gen::<f32>()), false);
    let mut expected = a.to_f64();

    for _ in 0..0x10_0000 {
        let int = rng.gen_range(0..0x100_0000);
        let frac = f64::from(rng.gen::<f32>());
        expected += int as f64 + frac;

        let b = operand(layout, int, frac, false);
        assert!((b.to_f64() - (int as f64 + frac)).abs() <= 1e-10);
        a = a.checked_add(&b).unwrap();

        if a.is_overflow() {
            let ratio = expected / TWO_POW_32;
            assert!((0.9999..1.005).contains(&ratio), "overflowed at {}", expected);
            assert_eq!(a.to_f64(), f64::INFINITY);
            return;
        }
    }

    panic!("Not overflown");
}

#[test]
fn test_add_negative_to_overflow() {
    let mut rng = rng();
    let layout = LimbLayout::new(8, 2).unwrap();

    let mut a = operand(layout, rng.gen_range(0..0x1a), f64::from(rng.gen::<f32>()), true);
    let mut expected = a.to_f64();

    for _ in 0..0x10_0000 {
        let int = rng.gen_range(0..0x100_0000);
        let frac = f64::from(rng.gen::<f32>());
        expected -= int as f64 + frac;

        a = a.checked_add(&operand(layout, int, frac, true)).unwrap();

        if a.is_overflow() {
            let ratio = expected / -TWO_POW_32;
            assert!((0.9999..1.005).contains(&ratio), "overflowed at {}", expected);
            assert_eq!(a.to_f64(), f64::NEG_INFINITY);
            return;
        }
    }

    panic!("Not overflown");
}

#[test]
fn test_mul_to_overflow() {
    let mut rng = rng();
    let layout = LimbLayout::new(8, 2).unwrap();

    let mut a = operand(layout, rng.gen_range(1..0x1000), f64::from(rng.gen::<f32>()), false);
    let mut expected = a.to_f64();

    for _ in 0..100_000 {
        let (int, frac) = if expected.abs() < f64::from(0x10_0000) {
            (rng.gen_range(1..0x1a), f64::from(rng.gen::<f32>()))
        } else {
            (1, f64::from(rng.gen::<f32>()) / 1000.0)
        };
        let negative = rng.gen::<bool>();

        let b = int as f64 + frac;
        expected *= if negative { -b } else { b };
        a = a.checked_mul(&operand(layout, int, frac, negative)).unwrap();

        if a.is_overflow() {
            let ratio = expected / TWO_POW_32;
            let sign = if a.is_negative() { -1.0 } else { 1.0 };
            assert!(
                (ratio - sign).abs() <= 0.002,
                "overflowed at {} with sign {}",
                expected,
                sign
            );
            return;
        }
    }

    panic!("Not overflown");
}
