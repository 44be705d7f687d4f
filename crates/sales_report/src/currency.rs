//! Locale-aware currency formatting.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::LocaleError;

/// Separators and symbol used to print amounts for one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyLocale {
    tag: &'static str,
    grouping_separator: char,
    decimal_separator: char,
    symbol: &'static str,
}

impl CurrencyLocale {
    /// Brazilian Portuguese: `R$ 1.234,50`.
    pub fn pt_br() -> Self {
        Self {
            tag: "pt-BR",
            grouping_separator: '.',
            decimal_separator: ',',
            symbol: "R$",
        }
    }

    /// United States English: `$ 1,234.50`.
    pub fn en_us() -> Self {
        Self {
            tag: "en-US",
            grouping_separator: ',',
            decimal_separator: '.',
            symbol: "$",
        }
    }

    /// German: `€ 1.234,50`.
    pub fn de_de() -> Self {
        Self {
            tag: "de-DE",
            grouping_separator: '.',
            decimal_separator: ',',
            symbol: "€",
        }
    }

    /// Returns the BCP 47 tag of the locale.
    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Returns the currency symbol printed by [`CurrencySymbol::Prefix`].
    pub fn symbol(&self) -> &str {
        self.symbol
    }
}

impl Default for CurrencyLocale {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl FromStr for CurrencyLocale {
    type Err = LocaleError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "pt-br" => Ok(Self::pt_br()),
            "en-us" => Ok(Self::en_us()),
            "de-de" => Ok(Self::de_de()),
            _ => Err(LocaleError::Unsupported(tag.to_owned())),
        }
    }
}

/// Whether the formatted amount carries the currency symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Digits only, as printed on body rows.
    Omit,
    /// `"<symbol> "` in front of the digits, as printed on the footer.
    Prefix,
}

/// Formats `value` with exactly two fractional digits using the separators of `locale`.
///
/// Midpoints round away from zero.
pub fn format_currency(value: Decimal, locale: &CurrencyLocale, symbol: CurrencySymbol) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 8);
    if symbol == CurrencySymbol::Prefix {
        formatted.push_str(locale.symbol);
        formatted.push(' ');
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }
    push_grouped(&mut formatted, integer, locale.grouping_separator);
    formatted.push(locale.decimal_separator);
    formatted.push_str(fraction);
    formatted
}

fn push_grouped(out: &mut String, integer: &str, separator: char) {
    let len = integer.len();
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn pt_br_groups_thousands_and_uses_decimal_comma() {
        let locale = CurrencyLocale::pt_br();
        assert_eq!(
            format_currency(dec!(1234.5), &locale, CurrencySymbol::Omit),
            "1.234,50"
        );
        assert_eq!(
            format_currency(dec!(1234567.891), &locale, CurrencySymbol::Omit),
            "1.234.567,89"
        );
    }

    #[test]
    fn prefix_adds_symbol() {
        assert_eq!(
            format_currency(dec!(150), &CurrencyLocale::pt_br(), CurrencySymbol::Prefix),
            "R$ 150,00"
        );
        assert_eq!(
            format_currency(dec!(1234.5), &CurrencyLocale::en_us(), CurrencySymbol::Prefix),
            "$ 1,234.50"
        );
    }

    #[test]
    fn small_values_are_not_grouped() {
        let locale = CurrencyLocale::pt_br();
        assert_eq!(format_currency(dec!(0), &locale, CurrencySymbol::Omit), "0,00");
        assert_eq!(format_currency(dec!(999.999), &locale, CurrencySymbol::Omit), "1.000,00");
        assert_eq!(format_currency(dec!(100), &locale, CurrencySymbol::Omit), "100,00");
    }

    #[test]
    fn midpoints_round_away_from_zero() {
        let locale = CurrencyLocale::en_us();
        assert_eq!(format_currency(dec!(0.125), &locale, CurrencySymbol::Omit), "0.13");
        assert_eq!(format_currency(dec!(2.345), &locale, CurrencySymbol::Omit), "2.35");
    }

    #[test]
    fn negative_values_keep_sign_after_symbol() {
        assert_eq!(
            format_currency(dec!(-1500.4), &CurrencyLocale::pt_br(), CurrencySymbol::Prefix),
            "R$ -1.500,40"
        );
        assert_eq!(
            format_currency(dec!(-0.001), &CurrencyLocale::pt_br(), CurrencySymbol::Omit),
            "0,00"
        );
    }

    #[test]
    fn parses_locale_tags() {
        assert_eq!("pt-BR".parse::<CurrencyLocale>().unwrap(), CurrencyLocale::pt_br());
        assert_eq!("en_us".parse::<CurrencyLocale>().unwrap(), CurrencyLocale::en_us());
        assert_eq!(" de-DE ".parse::<CurrencyLocale>().unwrap().tag(), "de-DE");
    }

    #[test]
    fn rejects_unknown_locale() {
        let err = "fr-FR".parse::<CurrencyLocale>().unwrap_err();
        assert!(err.to_string().contains("fr-FR"));
    }
}
