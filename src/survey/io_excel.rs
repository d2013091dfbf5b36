use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::survey::*;

/// The cells of a worksheet, without any assumption on headers.
///
/// Coordinates are those of the sheet: row 0 is the first row of the sheet, even if
/// the used area of the worksheet starts further down.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RawSheet {
    rows: Vec<Vec<DataType>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<DataType>>) -> RawSheet {
        RawSheet { rows }
    }

    pub fn from_range(range: &Range<DataType>) -> RawSheet {
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<DataType>> = Vec::new();
        for _ in 0..start_row {
            rows.push(Vec::new());
        }
        for row in range.rows() {
            let mut cells: Vec<DataType> = vec![DataType::Empty; start_col as usize];
            cells.extend(row.iter().cloned());
            rows.push(cells);
        }
        RawSheet { rows }
    }

    pub fn rows(&self) -> &[Vec<DataType>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Opens a spreadsheet (xlsx, xlsm, xlsb, xls, ods) and reads its first worksheet.
pub fn read_first_sheet(path: &str) -> ReportResult<RawSheet> {
    info!("Attempting to read survey file {:?}", path);
    let mut workbook =
        open_workbook_auto(path).context(OpeningSpreadsheetSnafu { path: path.to_string() })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptySpreadsheetSnafu { path: path.to_string() })?
        .context(OpeningSpreadsheetSnafu { path: path.to_string() })?;
    debug!(
        "read_first_sheet: range start: {:?} end: {:?}",
        wrange.start(),
        wrange.end()
    );
    Ok(RawSheet::from_range(&wrange))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_offset_is_padded() {
        let mut range: Range<DataType> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), DataType::String("Subject Code: X".to_string()));
        range.set_value((3, 2), DataType::Int(4));
        let sheet = RawSheet::from_range(&range);
        assert_eq!(sheet.num_rows(), 4);
        assert!(sheet.rows()[0].is_empty());
        assert!(sheet.rows()[1].is_empty());
        assert_eq!(
            sheet.rows()[2],
            vec![
                DataType::Empty,
                DataType::String("Subject Code: X".to_string()),
                DataType::Empty
            ]
        );
        assert_eq!(sheet.rows()[3][2], DataType::Int(4));
    }

    #[test]
    fn not_a_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("survey.xlsx");
        fs::write(&p, "this is not a workbook").unwrap();
        let res = read_first_sheet(&p.display().to_string());
        assert!(matches!(res, Err(ReportError::OpeningSpreadsheet { .. })));
    }

    #[test]
    fn missing_file() {
        let res = read_first_sheet("/nonexistent/exitsurvey/survey.xlsx");
        assert!(res.is_err());
    }
}
