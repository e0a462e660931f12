use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::AppError;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// Picks the format from the file name's extension, falling back to the
    /// content when there is none.
    pub fn detect(file_name: Option<&str>, data: &[u8]) -> Result<Self, AppError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(SheetFormat::Xlsx),
            Some("csv") => Ok(SheetFormat::Csv),
            Some(other) => Err(AppError::InvalidInput(format!(
                "Unsupported file type: .{}. Only XLSX and CSV files are supported",
                other
            ))),
            None if data.starts_with(ZIP_MAGIC) => Ok(SheetFormat::Xlsx),
            None if std::str::from_utf8(data).is_ok() => Ok(SheetFormat::Csv),
            None => Err(AppError::InvalidInput(
                "Could not determine file type".to_string(),
            )),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            SheetFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_extension() {
        assert_eq!(SheetFormat::detect(Some("Comments.XLSX"), b"").unwrap(), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(Some("data.csv"), b"PK\x03\x04").unwrap(), SheetFormat::Csv);
        assert!(matches!(
            SheetFormat::detect(Some("old.xls"), b""),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn sniffs_content_without_extension() {
        assert_eq!(SheetFormat::detect(None, b"PK\x03\x04rest").unwrap(), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::detect(Some("upload"), b"text\nhi\n").unwrap(), SheetFormat::Csv);
        assert!(SheetFormat::detect(None, b"\xff\xfe\x00").is_err());
    }
}
