//! Field descriptors: display types, options, and the tracker schema entry.
//!
//! Every tracker field carries a two-letter display-type code that decides
//! how stored values render. The five codes are fixed by the service;
//! anything else in a schema answer is a service bug and fails conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::wire::{FieldOptionRow, FieldRow};

/// The five display types a tracker field can have.
///
/// String representation uses the service's two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayType {
    /// Single-choice select box; stored value is one option id.
    SelectBox,
    /// Multi-choice select box; stored value is a comma-separated id list.
    MultiBox,
    /// One-line free text.
    TextField,
    /// Date; stored value is epoch seconds.
    DateField,
    /// Multi-line free text.
    TextArea,
}

/// Error returned when parsing an unknown display-type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDisplayType {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownDisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown display type '{}': expected one of SB, MB, TF, DF, TA",
            self.raw
        )
    }
}

impl std::error::Error for UnknownDisplayType {}

impl DisplayType {
    /// All display types in service order.
    pub const ALL: [Self; 5] = [
        Self::SelectBox,
        Self::MultiBox,
        Self::TextField,
        Self::DateField,
        Self::TextArea,
    ];

    /// Return the service's two-letter code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectBox => "SB",
            Self::MultiBox => "MB",
            Self::TextField => "TF",
            Self::DateField => "DF",
            Self::TextArea => "TA",
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = UnknownDisplayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SB" => Ok(Self::SelectBox),
            "MB" => Ok(Self::MultiBox),
            "TF" => Ok(Self::TextField),
            "DF" => Ok(Self::DateField),
            "TA" => Ok(Self::TextArea),
            _ => Err(UnknownDisplayType { raw: s.to_string() }),
        }
    }
}

// Custom serde: serialize as the two-letter code.
impl Serialize for DisplayType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DisplayType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// One selectable option of a select or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub id: i32,
    pub label: String,
}

impl From<FieldOptionRow> for FieldOption {
    fn from(row: FieldOptionRow) -> Self {
        Self {
            id: row.option_id,
            label: row.value,
        }
    }
}

/// One field of a tracker's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerField {
    pub id: i32,
    pub name: String,
    pub label: String,
    pub display_type: DisplayType,
    /// True for the fixed fields every tracker carries (status, severity,
    /// dates, summary, details, submitter, the id itself).
    pub standard: bool,
    pub options: Vec<FieldOption>,
}

impl TrackerField {
    /// Label of the option with this id, when the field has one.
    #[must_use]
    pub fn option_label(&self, id: i32) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.label.as_str())
    }
}

impl TryFrom<FieldRow> for TrackerField {
    type Error = UnknownDisplayType;

    fn try_from(row: FieldRow) -> Result<Self, Self::Error> {
        let display_type = row.display_type.parse()?;
        Ok(Self {
            id: row.field_id,
            name: row.field_name,
            label: row.label,
            display_type,
            standard: row.standard,
            options: row.options.into_iter().map(FieldOption::from).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Stored-value parsing
// ---------------------------------------------------------------------------

/// Parse a stored multi-select value list like `"3, 7,9"` into option ids.
///
/// Entries are comma-separated with whitespace tolerated on either side.
/// Entries that do not parse as integers are skipped; the service has
/// historically stored stray blanks and trailing separators.
#[must_use]
pub fn parse_value_ids(raw: &str) -> Vec<i32> {
    raw.split(',')
        .filter_map(|entry| entry.trim().parse::<i32>().ok())
        .collect()
}
