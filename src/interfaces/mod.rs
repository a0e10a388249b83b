// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod arithmetic;

pub use arithmetic::{Arithmetic, DoubleArithmetic, FixedPointArithmetic};
