// Primitives shared by the readers of the spreadsheet cells.

use calamine::DataType;

/// The text of a cell, as it would be printed.
///
/// Blank cells give an empty string.
pub fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(d) => d.to_string(),
        DataType::Empty => "".to_string(),
        other => format!("{:?}", other),
    }
}

/// The content of a cell if it holds text, `None` otherwise.
pub fn cell_string(cell: &DataType) -> Option<&str> {
    match cell {
        DataType::String(s) => Some(s.as_str()),
        _ => None,
    }
}

pub fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub fn is_blank_row(row: &[DataType]) -> bool {
    row.iter().all(is_blank)
}
