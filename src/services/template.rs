use bytes::Bytes;
use crate::error::AppError;
use crate::models::CellValue;
use crate::services::excel::XlsxWriter;

const SAMPLE_COMMENTS: &[&str] = &[
    "The support team was very helpful and friendly.",
    "Delivery was slow and the box arrived broken.",
    "The product does what the description says.",
];

/// Builds the downloadable upload template: one sheet with a header row
/// naming the text column and a few example comments.
pub fn build_template(text_column: &str, sheet_name: &str) -> Result<Bytes, AppError> {
    let columns = vec![text_column.to_string()];
    let rows: Vec<Vec<CellValue>> = SAMPLE_COMMENTS
        .iter()
        .map(|comment| vec![CellValue::String(comment.to_string())])
        .collect();
    XlsxWriter::new(sheet_name).write(&columns, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::read_xlsx;

    #[test]
    fn template_has_the_text_column() {
        let data = build_template("text", "Sheet1").unwrap();
        let table = read_xlsx(&data).unwrap();
        assert_eq!(table.columns(), ["text"]);
        assert_eq!(table.row_count(), SAMPLE_COMMENTS.len());
    }
}
