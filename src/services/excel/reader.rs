use super::utils::normalize_headers;
use std::io::Cursor;
use calamine::{Data, Xlsx, open_workbook_from_rs, Reader};
use crate::error::AppError;
use crate::models::{CellValue, RawTable};

/// Reads the first worksheet of an XLSX workbook. The first row is the header.
pub fn read_xlsx(file_data: &[u8]) -> Result<RawTable, AppError> {
    let start = std::time::Instant::now();
    let cursor = Cursor::new(file_data);

    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)
        .map_err(|e| AppError::Parse(format!("Failed to open Excel file: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Parse("No sheets found in workbook".to_string()))?;
    tracing::debug!("Reading sheet: {}", sheet_name);

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AppError::Parse(format!("Failed to read worksheet {}: {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        tracing::warn!("Sheet {} is empty", sheet_name);
        return Ok(RawTable::default());
    };

    let headers = normalize_headers(header_row.iter().map(|cell| cell.to_string()));
    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(to_cell_value).collect())
        .collect();

    tracing::debug!(
        "Read {} rows x {} columns from sheet {} in {:?}",
        data.len(),
        headers.len(),
        sheet_name,
        start.elapsed()
    );
    Ok(RawTable::new(headers, data))
}

pub fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(d) => CellValue::DateTime(d.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn converts_calamine_cells() {
        assert_eq!(to_cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(to_cell_value(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(
            to_cell_value(&Data::String("hi".into())),
            CellValue::String("hi".into())
        );
        assert_eq!(to_cell_value(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(to_cell_value(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            to_cell_value(&Data::Error(CellErrorType::Div0)),
            CellValue::Error("#DIV/0!".into())
        );
    }

    #[test]
    fn rejects_non_workbook_bytes() {
        let err = read_xlsx(b"definitely not a zip file").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
