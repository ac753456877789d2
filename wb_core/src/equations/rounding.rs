//! # Worksheet Rounding
//!
//! Moment indices are carried to one decimal place, fuel masses to whole
//! kilograms, pounds and litres to whole numbers. All of those go through
//! [`round_to`].

/// Round `value` to `decimals` decimal places, halves away from zero.
///
/// # Example
///
/// ```rust
/// use wb_core::equations::round_to;
///
/// assert_eq!(round_to(18.32, 1), 18.3);
/// assert_eq!(round_to(156.672, 0), 157.0);
/// assert_eq!(round_to(0.2711864, 3), 0.271);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals_are_honoured() {
        assert_eq!(round_to(2409.0293, 0), 2409.0);
        assert_eq!(round_to(2409.0293, 1), 2409.0);
        assert_eq!(round_to(2409.0293, 2), 2409.03);
        assert_eq!(round_to(11.54752, 1), 11.5);
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.25, 1), 0.3);
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(round_to(-27.936, 1), -27.9);
    }
}
