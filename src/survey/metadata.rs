use std::collections::BTreeMap;

use crate::survey::io_common::cell_string;
use crate::survey::io_excel::RawSheet;
use log::debug;

pub const UNKNOWN: &str = "Unknown";

/// The course fields that may be written in the preamble of a survey.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum MetadataField {
    SubjectCode,
    SubjectName,
    Branch,
    Year,
}

impl MetadataField {
    pub const ALL: [MetadataField; 4] = [
        MetadataField::SubjectCode,
        MetadataField::SubjectName,
        MetadataField::Branch,
        MetadataField::Year,
    ];
}

/// The labels searched in the text of a cell, in priority order.
/// A cell provides at most one field: the first label it contains.
pub const METADATA_LABELS: [(&str, MetadataField); 4] = [
    ("Subject Name", MetadataField::SubjectName),
    ("Subject Code", MetadataField::SubjectCode),
    ("Branch", MetadataField::Branch),
    ("Year", MetadataField::Year),
];

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Metadata {
    fields: BTreeMap<MetadataField, String>,
}

impl Metadata {
    /// The metadata used when the spreadsheet does not provide any.
    pub fn unknown() -> Metadata {
        Metadata {
            fields: MetadataField::ALL
                .iter()
                .map(|f| (*f, UNKNOWN.to_string()))
                .collect(),
        }
    }

    /// True if no field was found.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: MetadataField) -> bool {
        self.fields.contains_key(&field)
    }

    /// The value of the field, or `Unknown` if it was not found.
    pub fn get(&self, field: MetadataField) -> &str {
        self.fields
            .get(&field)
            .map(|s| s.as_str())
            .unwrap_or(UNKNOWN)
    }

    pub fn subject_code(&self) -> &str {
        self.get(MetadataField::SubjectCode)
    }

    pub fn insert(&mut self, field: MetadataField, value: String) {
        self.fields.insert(field, value);
    }
}

/// Scans all the text cells of the sheet for course fields.
///
/// The result only contains the fields actually found: an empty result means that the
/// sheet has no preamble. When a field appears several times, the last occurrence
/// (row by row) wins.
pub fn extract_metadata(sheet: &RawSheet) -> Metadata {
    let mut res = Metadata::default();
    for (row_idx, row) in sheet.rows().iter().enumerate() {
        for cell in row.iter() {
            let text = match cell_string(cell) {
                Some(s) => s,
                None => continue,
            };
            let field_o = METADATA_LABELS
                .iter()
                .find(|(label, _)| text.contains(*label))
                .map(|(_, field)| *field);
            if let Some(field) = field_o {
                let value = field_value(text);
                debug!(
                    "extract_metadata: row {}: {:?} = {:?}",
                    row_idx, field, value
                );
                res.insert(field, value);
            }
        }
    }
    res
}

// The text after the last colon, trimmed.
fn field_value(text: &str) -> String {
    let value = match text.rfind(':') {
        Some(idx) => &text[idx + 1..],
        None => text,
    };
    value.trim().to_string()
}
