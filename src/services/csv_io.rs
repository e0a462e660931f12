use bytes::Bytes;
use crate::error::AppError;
use crate::models::{CellValue, RawTable};
use crate::services::excel::utils::normalize_headers;

/// Reads a CSV upload. Every non-empty field becomes a string cell.
pub fn read_csv(file_data: &[u8]) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file_data);

    let headers = normalize_headers(reader.headers()?.iter());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(AppError::Parse(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            )));
        }
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect(),
        );
    }

    tracing::debug!("Read {} CSV rows x {} columns", rows.len(), headers.len());
    Ok(RawTable::new(headers, rows))
}

pub fn write_csv(columns: &[String], rows: &[Vec<CellValue>]) -> Result<Bytes, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let export_error = |e: csv::Error| AppError::Export(format!("Failed to write CSV: {}", e));

    writer.write_record(columns).map_err(export_error)?;
    for row in rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(export_error)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(Bytes::from(data))
}
