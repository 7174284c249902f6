//! Receipt date parsing and final date selection.

use chrono::{NaiveDate, NaiveDateTime};
use qc_model::{LotInfo, SampleCategory};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parse a raw `Receipt Date` cell.
///
/// Accepts ISO dates and datetimes (time dropped), day-first `DD/MM/YYYY`
/// as written by the LIMS, and `YYYY/MM/DD`. Anything else is `None`.
pub fn parse_receipt_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|dt| dt.date())
        })
}

/// Choose the canonical date of a record.
///
/// Raw material and packaging are dated by warehouse receipt (lot code),
/// then the supplier date, then the LIMS receipt date when the lot code
/// carries no date at all. Everything else is dated by the LIMS receipt
/// date, falling back to the supplier date.
pub fn unify_date(
    category: SampleCategory,
    lot: &LotInfo,
    receipt_date: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match category {
        SampleCategory::RawMaterial | SampleCategory::Packaging => {
            lot.warehouse_date.or(lot.supplier_date).or(receipt_date)
        }
        SampleCategory::Other | SampleCategory::Unclassified => {
            receipt_date.or(lot.supplier_date)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lot(warehouse: Option<NaiveDate>, supplier: Option<NaiveDate>) -> LotInfo {
        LotInfo {
            warehouse_date: warehouse,
            supplier_date: supplier,
            supplier_name: None,
        }
    }

    #[test]
    fn test_incoming_material_prefers_warehouse_date() {
        let info = lot(Some(date(2025, 1, 2)), Some(date(2024, 12, 29)));
        let receipt = Some(date(2025, 1, 5));
        assert_eq!(
            unify_date(SampleCategory::RawMaterial, &info, receipt),
            Some(date(2025, 1, 2))
        );
        let info = lot(None, Some(date(2024, 12, 29)));
        assert_eq!(
            unify_date(SampleCategory::Packaging, &info, receipt),
            Some(date(2024, 12, 29))
        );
    }

    #[test]
    fn test_other_prefers_receipt_date() {
        let info = lot(None, Some(date(2024, 12, 29)));
        assert_eq!(
            unify_date(SampleCategory::Other, &info, Some(date(2025, 1, 5))),
            Some(date(2025, 1, 5))
        );
        assert_eq!(
            unify_date(SampleCategory::Unclassified, &info, None),
            Some(date(2024, 12, 29))
        );
    }

    #[test]
    fn test_incoming_material_without_lot_dates_uses_receipt() {
        let receipt = Some(date(2025, 1, 5));
        assert_eq!(
            unify_date(SampleCategory::RawMaterial, &LotInfo::default(), receipt),
            receipt
        );
        assert_eq!(
            unify_date(SampleCategory::Packaging, &LotInfo::default(), receipt),
            receipt
        );
    }

    #[test]
    fn test_any_contributing_date_gives_final_date() {
        let candidates = [None, Some(date(2025, 1, 2))];
        for category in [
            SampleCategory::RawMaterial,
            SampleCategory::Packaging,
            SampleCategory::Other,
            SampleCategory::Unclassified,
        ] {
            for warehouse in candidates {
                for supplier in candidates {
                    for receipt in candidates {
                        // Only incoming material carries a warehouse date
                        let warehouse = warehouse.filter(|_| category.is_incoming_material());
                        let info = lot(warehouse, supplier);
                        let any = warehouse.or(supplier).or(receipt).is_some();
                        assert_eq!(
                            unify_date(category, &info, receipt).is_some(),
                            any,
                            "{category:?} {info:?} {receipt:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_dates_is_none() {
        assert_eq!(unify_date(SampleCategory::RawMaterial, &LotInfo::default(), None), None);
        assert_eq!(unify_date(SampleCategory::Other, &LotInfo::default(), None), None);
    }

    #[test]
    fn test_parse_receipt_date_formats() {
        assert_eq!(parse_receipt_date("2025-01-03"), Some(date(2025, 1, 3)));
        assert_eq!(parse_receipt_date("2025-01-03 08:15:00"), Some(date(2025, 1, 3)));
        assert_eq!(parse_receipt_date("2025-01-03T08:15"), Some(date(2025, 1, 3)));
        assert_eq!(parse_receipt_date("03/01/2025"), Some(date(2025, 1, 3)));
        assert_eq!(parse_receipt_date("2025/01/03"), Some(date(2025, 1, 3)));
    }

    #[test]
    fn test_parse_receipt_date_invalid() {
        assert_eq!(parse_receipt_date(""), None);
        assert_eq!(parse_receipt_date("pending"), None);
        assert_eq!(parse_receipt_date("2025-02-30"), None);
    }
}
