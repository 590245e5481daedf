//! Money helpers
//!
//! Storefront prices are Brazilian reais, held as [`rusty_money::Money`]
//! and constructed from minor units (centavos).

use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Creates a BRL amount from minor units (centavos).
#[must_use]
pub fn brl(minor_units: i64) -> Money<'static, Currency> {
    Money::from_minor(minor_units, iso::BRL)
}

/// Formats a BRL amount in the storefront display form, e.g. `R$ 14,90`.
#[must_use]
pub fn format_brl(money: &Money<'_, Currency>) -> String {
    let minor_units = money.to_minor_units();
    let sign = if minor_units < 0 { "-" } else { "" };
    let minor_units = minor_units.abs();

    let reais = group_thousands(minor_units / 100);
    let centavos = minor_units % 100;

    format!("{sign}R$ {reais},{centavos:02}")
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let mut remaining = digits.len();

    for digit in digits.chars() {
        grouped.push(digit);
        remaining -= 1;

        if remaining > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_uses_minor_units() {
        assert_eq!(brl(14_90).to_minor_units(), 1490);
    }

    #[test]
    fn formats_with_comma_decimal_separator() {
        assert_eq!(format_brl(&brl(14_90)), "R$ 14,90");
        assert_eq!(format_brl(&brl(29_80)), "R$ 29,80");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_brl(&brl(0)), "R$ 0,00");
    }

    #[test]
    fn formats_thousands_with_dot_separator() {
        assert_eq!(format_brl(&brl(1_234_567_89)), "R$ 1.234.567,89");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_brl(&brl(-3_00)), "-R$ 3,00");
    }

    #[test]
    fn formats_sub_real_amounts() {
        assert_eq!(format_brl(&brl(5)), "R$ 0,05");
    }
}
