//! Actual result normalization.
//!
//! Results are typed by hand into the LIMS: `"12,5"`, `"0.8 mm"`,
//! `"< 0,01"`, `"ND"`. The numeric value is the first plain decimal number
//! in the text after commas are read as decimal points.

use std::sync::LazyLock;

use regex::Regex;

/// First run of ASCII digits with an optional fractional part.
static RESULT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("Invalid result number regex"));

/// Extract the numeric value of a free-text result.
///
/// The number may appear anywhere in the text, so leading qualifiers such
/// as `<` or `~` are skipped. Signs, exponents and thousands separators are
/// not recognised: `"-5"` reads as `5` and `"1,234"` as `1.234`.
///
/// ```
/// use qc_transform::numeric::normalize_result;
///
/// assert_eq!(normalize_result("12,5 mg"), Some(12.5));
/// assert_eq!(normalize_result("< 0,01"), Some(0.01));
/// assert_eq!(normalize_result("abc"), None);
/// ```
pub fn normalize_result(raw: &str) -> Option<f64> {
    let normalized = raw.replace(',', ".");
    let token = RESULT_NUMBER.find(&normalized)?;
    token
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Normalize an optional result cell.
pub fn normalize_optional_result(raw: Option<&str>) -> Option<f64> {
    raw.and_then(normalize_result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal() {
        assert_eq!(normalize_result("12,5"), Some(12.5));
        assert_eq!(normalize_result("0,8 mm"), Some(0.8));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(normalize_result("7"), Some(7.0));
        assert_eq!(normalize_result(" 3.25 "), Some(3.25));
    }

    #[test]
    fn test_leading_qualifiers_skipped() {
        assert_eq!(normalize_result("< 0,01"), Some(0.01));
        assert_eq!(normalize_result(">100"), Some(100.0));
        assert_eq!(normalize_result("pH 6.8"), Some(6.8));
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(normalize_result("12.5.3"), Some(12.5));
        assert_eq!(normalize_result("10 - 12"), Some(10.0));
    }

    #[test]
    fn test_trailing_point_not_consumed() {
        assert_eq!(normalize_result("12."), Some(12.0));
    }

    #[test]
    fn test_no_sign_or_exponent() {
        assert_eq!(normalize_result("-5"), Some(5.0));
        assert_eq!(normalize_result("1e3"), Some(1.0));
    }

    #[test]
    fn test_no_number() {
        assert_eq!(normalize_result("abc"), None);
        assert_eq!(normalize_result("n/a"), None);
        assert_eq!(normalize_result(""), None);
        assert_eq!(normalize_result("٣"), None);
    }

    #[test]
    fn test_optional() {
        assert_eq!(normalize_optional_result(None), None);
        assert_eq!(normalize_optional_result(Some("1,5")), Some(1.5));
    }
}
