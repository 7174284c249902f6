//! Sample type classification.
//!
//! The LIMS stores the sample type as free text (`"RM - Raw material"`,
//! `"PG - Packaging"`, `"FG - Finished goods"`, ...). It is classified once
//! when a row is read and the tagged variant is used everywhere after that.

use std::fmt;

use serde::{Deserialize, Serialize};

const RAW_MATERIAL_TOKENS: &[&str] = &["rm", "raw material"];
const PACKAGING_TOKENS: &[&str] = &["pg", "packaging"];

/// Category of a lab sample, derived from its `Sample Type` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleCategory {
    /// Incoming raw material; lot codes carry warehouse and supplier dates.
    RawMaterial,
    /// Incoming packaging; same lot code layout as raw material.
    Packaging,
    /// Any other labelled sample type (finished goods, in-process, ...).
    Other,
    /// No sample type recorded.
    Unclassified,
}

impl SampleCategory {
    /// Classify a raw `Sample Type` label.
    ///
    /// Matching is case-insensitive and by substring. Raw material tokens are
    /// checked before packaging tokens.
    ///
    /// ```
    /// use qc_model::SampleCategory;
    ///
    /// assert_eq!(SampleCategory::classify(Some("RM - Raw material")), SampleCategory::RawMaterial);
    /// assert_eq!(SampleCategory::classify(Some("PG - Packaging")), SampleCategory::Packaging);
    /// assert_eq!(SampleCategory::classify(Some("FG - Finished goods")), SampleCategory::Other);
    /// assert_eq!(SampleCategory::classify(None), SampleCategory::Unclassified);
    /// ```
    pub fn classify(label: Option<&str>) -> Self {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            return Self::Unclassified;
        };
        let lower = label.to_lowercase();
        if RAW_MATERIAL_TOKENS.iter().any(|t| lower.contains(t)) {
            Self::RawMaterial
        } else if PACKAGING_TOKENS.iter().any(|t| lower.contains(t)) {
            Self::Packaging
        } else {
            Self::Other
        }
    }

    /// True for raw material and packaging, whose lot codes are
    /// `warehouse date - supplier - supplier date`.
    pub const fn is_incoming_material(self) -> bool {
        match self {
            Self::RawMaterial | Self::Packaging => true,
            Self::Other | Self::Unclassified => false,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RawMaterial => "Raw material",
            Self::Packaging => "Packaging",
            Self::Other => "Other",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for SampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
