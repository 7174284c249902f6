//! Lot code parsing.
//!
//! Lot codes are hyphen-delimited. For raw material and packaging the layout
//! is `DDMMYY-SUPPLIER-DDMMYY[-...]`: warehouse receipt date, supplier code
//! and supplier batch date. Every other category starts with the supplier
//! (or production) date and the rest of the code is not interpreted.

use chrono::NaiveDate;
use qc_model::{LotInfo, SampleCategory};

/// Supplier segment used for lots produced in-house.
pub const INTERNAL_SUPPLIER: &str = "MBP";

/// Number of leading characters of a segment read as a `DDMMYY` date.
pub const LOT_DATE_LEN: usize = 6;

const LOT_DATE_FORMAT: &str = "%d%m%y";

/// Split a lot code into trimmed, non-empty segments.
pub fn split_lot_segments(lot_number: &str) -> Vec<&str> {
    lot_number
        .split('-')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Parse the leading `DDMMYY` date of a lot segment.
///
/// Only the first six characters are read; anything after them (a shift
/// letter, a line number) is ignored. Short, non-numeric or impossible dates
/// give `None`. Two-digit years 00-69 map to 2000-2069 and 70-99 to
/// 1970-1999.
///
/// ```
/// use chrono::NaiveDate;
/// use qc_transform::lot::parse_lot_date;
///
/// assert_eq!(parse_lot_date("020125"), NaiveDate::from_ymd_opt(2025, 1, 2));
/// assert_eq!(parse_lot_date("291224A2"), NaiveDate::from_ymd_opt(2024, 12, 29));
/// assert_eq!(parse_lot_date("310225"), None);
/// ```
pub fn parse_lot_date(segment: &str) -> Option<NaiveDate> {
    let prefix: String = segment.chars().take(LOT_DATE_LEN).collect();
    if prefix.len() != LOT_DATE_LEN || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(&prefix, LOT_DATE_FORMAT).ok()
}

/// Extract warehouse date, supplier date and supplier name from a lot code.
///
/// Never fails: each field is parsed independently and is `None` when its
/// segment is missing or malformed.
pub fn parse_lot_number(lot_number: Option<&str>, category: SampleCategory) -> LotInfo {
    let Some(lot_number) = lot_number else {
        return LotInfo::default();
    };
    let segments = split_lot_segments(lot_number);
    let date_at = |idx: usize| segments.get(idx).and_then(|s| parse_lot_date(s));

    match category {
        SampleCategory::RawMaterial | SampleCategory::Packaging => LotInfo {
            warehouse_date: date_at(0),
            supplier_name: segments
                .get(1)
                .filter(|supplier| **supplier != INTERNAL_SUPPLIER)
                .map(|supplier| (*supplier).to_string()),
            supplier_date: date_at(2),
        },
        SampleCategory::Other | SampleCategory::Unclassified => LotInfo {
            supplier_date: date_at(0),
            ..LotInfo::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_raw_material_full_lot() {
        let lot = parse_lot_number(Some("020125-KIB08-291224-MBP"), SampleCategory::RawMaterial);
        assert_eq!(lot.warehouse_date, date(2025, 1, 2));
        assert_eq!(lot.supplier_name.as_deref(), Some("KIB08"));
        assert_eq!(lot.supplier_date, date(2024, 12, 29));
    }

    #[test]
    fn test_internal_supplier_suppressed() {
        let lot = parse_lot_number(Some("020125-MBP"), SampleCategory::RawMaterial);
        assert_eq!(lot.warehouse_date, date(2025, 1, 2));
        assert_eq!(lot.supplier_name, None);
        assert_eq!(lot.supplier_date, None);
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        let lot = parse_lot_number(Some("020125-mbp"), SampleCategory::Packaging);
        assert_eq!(lot.supplier_name.as_deref(), Some("mbp"));
    }

    #[test]
    fn test_bare_date_lot() {
        let lot = parse_lot_number(Some("020125"), SampleCategory::Packaging);
        assert_eq!(lot.warehouse_date, date(2025, 1, 2));
        assert_eq!(lot.supplier_name, None);
        assert_eq!(lot.supplier_date, None);
    }

    #[test]
    fn test_other_category_uses_first_segment_as_supplier_date() {
        let lot = parse_lot_number(Some("150325-L2-KIB08"), SampleCategory::Other);
        assert_eq!(lot.supplier_date, date(2025, 3, 15));
        assert_eq!(lot.warehouse_date, None);
        assert_eq!(lot.supplier_name, None);
    }

    #[test]
    fn test_empty_segments_dropped() {
        let lot = parse_lot_number(Some(" 020125 --KIB08- -291224"), SampleCategory::RawMaterial);
        assert_eq!(lot.warehouse_date, date(2025, 1, 2));
        assert_eq!(lot.supplier_name.as_deref(), Some("KIB08"));
        assert_eq!(lot.supplier_date, date(2024, 12, 29));
    }

    #[test]
    fn test_bad_date_does_not_affect_other_fields() {
        let lot = parse_lot_number(Some("ABCDEF-KIB08-291224"), SampleCategory::RawMaterial);
        assert_eq!(lot.warehouse_date, None);
        assert_eq!(lot.supplier_name.as_deref(), Some("KIB08"));
        assert_eq!(lot.supplier_date, date(2024, 12, 29));
    }

    #[test]
    fn test_missing_or_blank_lot() {
        assert!(parse_lot_number(None, SampleCategory::RawMaterial).is_empty());
        assert!(parse_lot_number(Some(" - "), SampleCategory::Other).is_empty());
    }

    #[test]
    fn test_parse_lot_date_rejects_short_and_non_numeric() {
        assert_eq!(parse_lot_date("0201"), None);
        assert_eq!(parse_lot_date("02O125"), None);
        assert_eq!(parse_lot_date("ＡＢＣＤＥＦ"), None);
        assert_eq!(parse_lot_date("320125"), None);
    }

    #[test]
    fn test_parse_lot_date_century_pivot() {
        assert_eq!(parse_lot_date("010100"), date(2000, 1, 1));
        assert_eq!(parse_lot_date("010169"), date(2069, 1, 1));
        assert_eq!(parse_lot_date("010170"), date(1970, 1, 1));
        assert_eq!(parse_lot_date("311299"), date(1999, 12, 31));
    }

    #[test]
    fn test_split_lot_segments() {
        assert_eq!(split_lot_segments("a- b -"), vec!["a", "b"]);
        assert!(split_lot_segments("").is_empty());
    }
}
