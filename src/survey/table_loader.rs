use std::collections::HashSet;

use calamine::DataType;
use log::{debug, info, warn};

use crate::survey::config_reader::ReportConfig;
use crate::survey::io_common::{cell_string, cell_text, is_blank, is_blank_row};
use crate::survey::io_excel::RawSheet;
use crate::survey::metadata::Metadata;

/// Where the header of the survey table sits in the sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum HeaderLocation {
    AtRow(usize),
}

impl HeaderLocation {
    /// With a preamble, the header is located with the survey marker. Without one,
    /// the sheet is the survey itself and starts at the first row.
    pub fn for_sheet(sheet: &RawSheet, metadata: &Metadata, config: &ReportConfig) -> Self {
        if metadata.is_empty() {
            HeaderLocation::AtRow(0)
        } else {
            HeaderLocation::AtRow(find_survey_start(
                sheet,
                config.survey_start_marker(),
                config.default_survey_start_row(),
            ))
        }
    }

    pub fn row(&self) -> usize {
        match self {
            HeaderLocation::AtRow(n) => *n,
        }
    }
}

/// Index of the first row whose first cell contains the marker.
///
/// This is a heuristic: it relies on the survey header carrying the marker in its first
/// column. Sheets without it fall back to `default_row`.
pub fn find_survey_start(sheet: &RawSheet, marker: &str, default_row: usize) -> usize {
    for (idx, row) in sheet.rows().iter().enumerate() {
        let first = row.first().map(cell_text).unwrap_or_default();
        if first.contains(marker) {
            debug!("find_survey_start: marker {:?} found at row {}", marker, idx);
            return idx;
        }
    }
    warn!(
        "find_survey_start: marker {:?} not found, using default row {}",
        marker, default_row
    );
    default_row
}

/// The tabular part of the survey: one row per respondent.
///
/// The first column identifies the respondent. All the other columns are questions.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveyTable {
    header: Vec<String>,
    rows: Vec<Vec<DataType>>,
}

impl SurveyTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<DataType>>) -> SurveyTable {
        let width = header.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, DataType::Empty);
                r
            })
            .collect();
        SurveyTable { header, rows }
    }

    /// Reads the table below the given header row. Blank rows are skipped, including
    /// before the header: the header is the first non-blank row from the location.
    pub fn from_sheet(sheet: &RawSheet, location: HeaderLocation) -> SurveyTable {
        let start_idx = location.row();
        let all_rows = sheet.rows();
        let header_idx = match all_rows
            .iter()
            .enumerate()
            .skip(start_idx)
            .find(|(_, r)| !is_blank_row(r))
        {
            Some((idx, _)) => idx,
            None => {
                warn!(
                    "SurveyTable::from_sheet: no header at or after row {} ({} rows)",
                    start_idx,
                    all_rows.len()
                );
                return SurveyTable::new(Vec::new(), Vec::new());
            }
        };
        if header_idx != start_idx {
            debug!(
                "SurveyTable::from_sheet: row {} is blank, header found at row {}",
                start_idx, header_idx
            );
        }
        let header_row = &all_rows[header_idx];
        let data_rows: Vec<&Vec<DataType>> = all_rows[header_idx + 1..]
            .iter()
            .filter(|r| !is_blank_row(r))
            .collect();

        // Trailing columns without a name or any content are not part of the survey.
        let max_width = data_rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(header_row.len()))
            .max()
            .unwrap_or(0);
        let width = (0..max_width)
            .rev()
            .find(|col| {
                header_row.get(*col).map_or(false, |c| !is_blank(c))
                    || data_rows
                        .iter()
                        .any(|r| r.get(*col).map_or(false, |c| !is_blank(c)))
            })
            .map(|col| col + 1)
            .unwrap_or(0);

        let header = column_labels(header_row, width);
        debug!("SurveyTable::from_sheet: header: {:?}", header);
        let rows = data_rows
            .iter()
            .map(|r| r.iter().take(width).cloned().collect())
            .collect();
        SurveyTable::new(header, rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn num_columns(&self) -> usize {
        self.header.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Removes the columns with these exact names. Missing columns are ignored.
    pub fn drop_columns(&mut self, names: &[String]) {
        let keep: Vec<bool> = self
            .header
            .iter()
            .map(|h| !names.iter().any(|n| n == h))
            .collect();
        if keep.iter().all(|k| *k) {
            debug!("drop_columns: none of {:?} present", names);
            return;
        }
        self.header = retain_by_mask(&self.header, &keep);
        self.rows = self
            .rows
            .iter()
            .map(|r| retain_by_mask(r, &keep))
            .collect();
        debug!("drop_columns: remaining header: {:?}", self.header);
    }

    /// Renames the question columns `{course_code}.1`, `{course_code}.2`, ...
    /// The first column keeps its name.
    pub fn relabel_questions(&mut self, course_code: &str) {
        for (idx, col) in self.header.iter_mut().enumerate().skip(1) {
            *col = format!("{}.{}", course_code, idx);
        }
    }

    pub fn question_labels(&self) -> &[String] {
        self.header.get(1..).unwrap_or(&[])
    }

    /// The text answers of each respondent, one entry per question column.
    pub fn question_answers(&self) -> impl Iterator<Item = Vec<Option<&str>>> + '_ {
        self.rows
            .iter()
            .map(|r| r.iter().skip(1).map(cell_string).collect())
    }
}

/// Loads the survey table of the sheet and settles the metadata of the report.
///
/// The returned metadata is the one extracted from the sheet, or all `Unknown` if the
/// sheet has none.
pub fn load_survey_table(
    sheet: &RawSheet,
    metadata: Metadata,
    config: &ReportConfig,
) -> (SurveyTable, Metadata) {
    let location = HeaderLocation::for_sheet(sheet, &metadata, config);
    let metadata = if metadata.is_empty() {
        info!("load_survey_table: no course metadata found, reading the first row as header");
        Metadata::unknown()
    } else {
        metadata
    };
    info!("load_survey_table: header location: {:?}", location);

    let mut table = SurveyTable::from_sheet(sheet, location);
    table.drop_columns(&config.dropped_columns());
    table.relabel_questions(metadata.subject_code());
    info!(
        "load_survey_table: {} respondents, {} questions",
        table.num_rows(),
        table.question_labels().len()
    );
    (table, metadata)
}

// Names of the columns: blank names are replaced and duplicates get a numeric suffix.
fn column_labels(header_row: &[DataType], width: usize) -> Vec<String> {
    let mut existing_names: HashSet<String> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for idx in 0..width {
        let base = match header_row.get(idx) {
            Some(c) if !is_blank(c) => cell_text(c),
            _ => format!("Unnamed: {}", idx),
        };
        let mut name = base.clone();
        let mut counter = 1;
        while !existing_names.insert(name.clone()) {
            name = format!("{}.{}", base, counter);
            counter += 1;
        }
        res.push(name);
    }
    res
}

fn retain_by_mask<T: Clone>(values: &[T], keep: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(keep.iter())
        .filter(|(_, k)| **k)
        .map(|(v, _)| v.clone())
        .collect()
}
