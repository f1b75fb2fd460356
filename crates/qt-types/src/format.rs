//! Display formatting for monetary amounts and computed metrics.

use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum fraction digits kept by [`format_grouped`].
const GROUPED_MAX_FRACTION_DIGITS: u32 = 3;

/// Format `value` with exactly `dp` fraction digits, rounding half away from zero.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Thousands-grouped rendering in the en-US style: `1234567.5` becomes
/// `1,234,567.5`. At most three fraction digits are kept and trailing zeros
/// are dropped.
pub fn format_grouped(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(GROUPED_MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount with grouping, e.g. `$1,250,000`.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_grouped(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fixed_rounds_half_away_from_zero() {
        assert_eq!(format_fixed(dec!(1.25), 2), "1.25");
        assert_eq!(format_fixed(dec!(1.255), 2), "1.26");
        assert_eq!(format_fixed(dec!(30), 1), "30.0");
        assert_eq!(format_fixed(dec!(7.5), 2), "7.50");
        assert_eq!(format_fixed(dec!(-2.345), 2), "-2.35");
    }

    #[test]
    fn grouped_inserts_separators() {
        assert_eq!(format_grouped(dec!(0)), "0");
        assert_eq!(format_grouped(dec!(999)), "999");
        assert_eq!(format_grouped(dec!(1000)), "1,000");
        assert_eq!(format_grouped(dec!(1234567.5)), "1,234,567.5");
        assert_eq!(format_grouped(dec!(100000000000)), "100,000,000,000");
    }

    #[test]
    fn grouped_limits_fraction_digits() {
        assert_eq!(format_grouped(dec!(1234.56789)), "1,234.568");
        assert_eq!(format_grouped(dec!(12.100)), "12.1");
        assert_eq!(format_grouped(dec!(-9876543.21)), "-9,876,543.21");
        assert_eq!(format_grouped(dec!(-0.0001)), "0");
    }

    #[test]
    fn currency_prefixes_dollar_sign() {
        assert_eq!(format_currency(dec!(100)), "$100");
        assert_eq!(format_currency(dec!(2500000)), "$2,500,000");
        assert_eq!(format_currency(dec!(-1500)), "$-1,500");
    }
}
