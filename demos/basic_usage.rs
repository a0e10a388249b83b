// ============================================================================
// Basic Usage Example
// ============================================================================

use fixed_limb::prelude::*;
use num_bigint::BigInt;
use rust_decimal::Decimal;

fn main() -> Result<(), NumericError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Fixed-Limb Example ===\n");

    let layout = LimbLayout::new(8, 2)?;
    println!("Layout: {} limbs, {} integer", layout.size(), layout.int_size());

    // Build operands from integers and unit fractions
    let a = FixedPoint::from_int(layout, 0x1_0034)?
        .checked_add(&FixedPoint::from_unit_fraction(layout, 0.125)?)?;
    let b = FixedPoint::from_int(layout, 0xe0ab)?
        .checked_add(&FixedPoint::from_unit_fraction(layout, 0.5)?)?
        .negate();

    println!("a     = {} ({})", a, a.to_f64());
    println!("b     = {} ({})", b, b.to_f64());
    println!("a + b = {}", (&a + &b).to_f64());
    println!("a * b = {}\n", (&a * &b).to_f64());

    // Overflow is sticky and only becomes an error at integer extraction
    let huge = a.square().square();
    println!("a^4 overflowed: {} -> {}", huge.is_overflow(), huge.to_f64());
    println!("a^4 as integer: {:?}\n", huge.to_int());

    // Ratio conversion picks its own size unless told otherwise
    let config = RatioConfig::default();
    let p = BigInt::from(848_289_943_712i64);
    let q = BigInt::from(424_116_878_428i64);
    let adaptive = FixedPoint::from_ratio(&p, &q, None, &config)?;
    let explicit = FixedPoint::from_ratio(&p, &q, Some(8), &config)?;
    println!("p/q adaptive: {:?}", adaptive);
    println!("p/q explicit: {:?}", explicit);

    let price = FixedPoint::from_decimal(Decimal::new(-12345, 2), Some(4), &config)?;
    println!("-123.45 -> {}", price);

    // The same generic code on both backends
    let fixed = FixedPointArithmetic::new(layout);
    let double = DoubleArithmetic;
    let fx = fixed.twice_mul(&fixed.from_int(-7)?, &fixed.from_int(9)?)?;
    let dx = double.twice_mul(&double.from_int(-7)?, &double.from_int(9)?)?;
    println!("\n2 * -7 * 9 on {}: {}", fixed.name(), fixed.to_f64(&fx));
    println!("2 * -7 * 9 on {}: {}", double.name(), double.to_f64(&dx));

    Ok(())
}
