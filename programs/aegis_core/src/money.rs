// programs/aegis_core/src/money.rs
//
// Minor-unit money arithmetic. All monetary fields in the workspace are
// u64 minor units with an explicit Currency tag; no floating point ever
// touches a balance. Rounding is half-up at the minor unit and
// deterministic across programs.

/// Basis points denominator (10000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Checked addition, None on overflow. Callers surface overflow as a
/// MathOverflow error rather than wrapping.
pub fn checked_add(a: u64, b: u64) -> Option<u64> {
    a.checked_add(b)
}

/// Checked subtraction, None when b > a.
pub fn checked_sub(a: u64, b: u64) -> Option<u64> {
    a.checked_sub(b)
}

/// Subtraction clamped at zero.
pub fn clamp_non_negative(a: u64, b: u64) -> u64 {
    a.saturating_sub(b)
}

/// Percentage of an amount expressed in basis points, rounded half-up at
/// the minor unit. 128-bit intermediate so amount * bps cannot overflow.
pub fn percentage_of(amount: u64, bps: u16) -> u64 {
    let numerator = (amount as u128) * (bps as u128) * 2 + BPS_DENOMINATOR as u128;
    (numerator / (2 * BPS_DENOMINATOR as u128)) as u64
}

/// Pro-rata share of an amount over a day span, rounded half-up.
/// Returns 0 when the denominator is zero.
pub fn pro_rata(amount: u64, numerator_days: u32, denominator_days: u32) -> u64 {
    if denominator_days == 0 {
        return 0;
    }
    let num = (amount as u128) * (numerator_days as u128) * 2 + denominator_days as u128;
    (num / (2 * denominator_days as u128)) as u64
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_exact() {
        // 80% of 1000.00 = 800.00
        assert_eq!(percentage_of(100_000, 8_000), 80_000);
    }

    #[test]
    fn test_percentage_of_rounds_half_up() {
        // 50% of 0.01 = 0.005 -> rounds up to 0.01
        assert_eq!(percentage_of(1, 5_000), 1);
        // 49.99% of 0.01 = 0.004999 -> rounds down to 0
        assert_eq!(percentage_of(1, 4_999), 0);
    }

    #[test]
    fn test_percentage_of_zero() {
        assert_eq!(percentage_of(0, 8_000), 0);
        assert_eq!(percentage_of(100_000, 0), 0);
    }

    #[test]
    fn test_percentage_of_full() {
        assert_eq!(percentage_of(123_456, 10_000), 123_456);
    }

    #[test]
    fn test_percentage_of_large_amount_no_overflow() {
        // Near-max u64 with a u128 intermediate must not overflow
        let amount = u64::MAX / 2;
        assert_eq!(percentage_of(amount, 10_000), amount);
    }

    #[test]
    fn test_split_error_bound() {
        // A sum of N bps splits never exceeds the original by more than
        // N-1 minor units
        let amount = 99_999;
        let splits = [3_333u16, 3_333, 3_334];
        let total: u64 = splits.iter().map(|&bps| percentage_of(amount, bps)).sum();
        assert!(total >= amount);
        assert!(total <= amount + (splits.len() as u64 - 1));
    }

    #[test]
    fn test_pro_rata_annual_refund() {
        // 1200.00 with 180 of 365 days remaining -> 591.78
        assert_eq!(pro_rata(120_000, 180, 365), 59_178);
    }

    #[test]
    fn test_pro_rata_full_and_zero_span() {
        assert_eq!(pro_rata(120_000, 365, 365), 120_000);
        assert_eq!(pro_rata(120_000, 0, 365), 0);
    }

    #[test]
    fn test_pro_rata_zero_denominator() {
        assert_eq!(pro_rata(120_000, 10, 0), 0);
    }

    #[test]
    fn test_pro_rata_rounds_half_up() {
        // 1.00 * 1/2 = 0.50 -> 1 minor unit... 100 * 1 / 2 = 50 exactly
        assert_eq!(pro_rata(100, 1, 2), 50);
        // 0.01 * 1/2 = 0.005 -> rounds up
        assert_eq!(pro_rata(1, 1, 2), 1);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(clamp_non_negative(100, 40), 60);
        assert_eq!(clamp_non_negative(40, 100), 0);
    }

    #[test]
    fn test_checked_ops() {
        assert_eq!(checked_add(1, 2), Some(3));
        assert_eq!(checked_add(u64::MAX, 1), None);
        assert_eq!(checked_sub(2, 1), Some(1));
        assert_eq!(checked_sub(1, 2), None);
    }
}
