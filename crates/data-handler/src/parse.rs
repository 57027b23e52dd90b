//! Field parsers for exported price-history rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date layouts seen in price-history exports, tried in order.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%b %d, %Y"];

/// Parses a date field in any of the supported layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Parses a percentage string such as `"0.12%"` or `"-1.5 %"` into a fraction.
///
/// The trailing percent sign is optional. Returns `None` for empty or
/// non-numeric input.
pub fn parse_percentage(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let number = number.strip_prefix('+').unwrap_or(number);
    if number.is_empty() {
        return None;
    }

    let percent = Decimal::from_str(number).ok()?;
    percent.checked_div(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("0.12%", dec!(0.0012))]
    #[case("-1.50%", dec!(-0.015))]
    #[case(" +0.3 % ", dec!(0.003))]
    #[case("2", dec!(0.02))]
    #[case("0.00%", dec!(0))]
    fn parses_percentages(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_percentage(raw), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("%")]
    #[case("n/a")]
    #[case("1.2.3%")]
    fn rejects_malformed_percentages(#[case] raw: &str) {
        assert_eq!(parse_percentage(raw), None);
    }

    #[rstest]
    #[case("06/01/2021")]
    #[case("2021-06-01")]
    #[case("Jun 01, 2021")]
    fn parses_supported_date_layouts(#[case] raw: &str) {
        assert_eq!(parse_date(raw), NaiveDate::from_ymd_opt(2021, 6, 1));
    }

    #[test]
    fn rejects_unknown_date_layout() {
        assert_eq!(parse_date("01.06.2021"), None);
    }
}
