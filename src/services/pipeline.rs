//! Upload bytes in, scored spreadsheet out.
//!
//! The pipeline is a single synchronous pass with no shared mutable state:
//! one call owns its table from parse to serialization. Any row that cannot
//! be scored fails the whole batch.

use bytes::Bytes;
use std::sync::Arc;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{RawTable, ScoredRow, ScoredTable, Sentiment};
use crate::services::csv_io::{read_csv, write_csv};
use crate::services::excel::{read_xlsx, XlsxWriter};
use crate::services::format::SheetFormat;
use crate::services::scorer::{ScorerError, SentimentScorer};

#[derive(Debug)]
pub struct ScoredExport {
    pub table: ScoredTable,
    pub data: Bytes,
    pub format: SheetFormat,
}

#[derive(Clone)]
pub struct ScoringPipeline {
    scorer: Arc<dyn SentimentScorer>,
    text_column: String,
    xlsx_writer: XlsxWriter,
}

impl ScoringPipeline {
    pub fn new(
        scorer: Arc<dyn SentimentScorer>,
        text_column: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            scorer,
            text_column: text_column.into(),
            xlsx_writer: XlsxWriter::new(sheet_name),
        }
    }

    pub fn from_config(config: &Config, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self::new(scorer, config.text_column.clone(), config.sheet_name.clone())
    }

    pub fn text_column(&self) -> &str {
        &self.text_column
    }

    pub fn parse(&self, file_data: &[u8], format: SheetFormat) -> Result<RawTable, AppError> {
        match format {
            SheetFormat::Xlsx => read_xlsx(file_data),
            SheetFormat::Csv => read_csv(file_data),
        }
    }

    /// Scores every row in input order.
    ///
    /// Fails with [`AppError::Validation`] before touching any row when the
    /// text column is missing, and with [`AppError::Scoring`] (1-based row)
    /// on the first cell that cannot be scored.
    pub fn score(&self, raw: RawTable) -> Result<ScoredTable, AppError> {
        let text_idx = raw.column_index(&self.text_column).ok_or_else(|| {
            AppError::Validation(format!("missing required column '{}'", self.text_column))
        })?;

        let (columns, rows) = raw.into_parts();
        let mut scored = Vec::with_capacity(rows.len());
        for (idx, cells) in rows.into_iter().enumerate() {
            let row = idx + 1;
            let text = cells[text_idx].as_text().ok_or_else(|| {
                AppError::scoring(
                    row,
                    ScorerError::new(format!(
                        "cell value {} is not representable as text",
                        cells[text_idx]
                    )),
                )
            })?;
            let sentiment = self.score_text(&text).map_err(|e| AppError::scoring(row, e))?;
            scored.push(ScoredRow::new(cells, sentiment));
        }

        Ok(ScoredTable::new(columns, scored))
    }

    fn score_text(&self, text: &str) -> Result<Sentiment, ScorerError> {
        if text.trim().is_empty() {
            return Ok(Sentiment::NEUTRAL);
        }
        let sentiment = self.scorer.score(text)?;
        if !sentiment.in_range() {
            return Err(ScorerError::new(format!(
                "scorer returned out-of-range values (polarity {}, subjectivity {})",
                sentiment.polarity, sentiment.subjectivity
            )));
        }
        Ok(sentiment)
    }

    pub fn serialize(&self, table: &ScoredTable, format: SheetFormat) -> Result<Bytes, AppError> {
        let (columns, rows) = table.export_rows();
        match format {
            SheetFormat::Xlsx => self.xlsx_writer.write(&columns, &rows),
            SheetFormat::Csv => write_csv(&columns, &rows),
        }
    }

    /// Parses, scores and serializes one upload.
    pub fn process(
        &self,
        file_data: &[u8],
        input: SheetFormat,
        output: SheetFormat,
    ) -> Result<ScoredExport, AppError> {
        let start = std::time::Instant::now();
        tracing::info!("Parsing {:?} upload, size: {}KB", input, file_data.len() / 1024);
        let raw = self.parse(file_data, input)?;

        tracing::info!("Scoring {} rows from column '{}'", raw.row_count(), self.text_column);
        let score_start = std::time::Instant::now();
        let table = self.score(raw)?;
        tracing::info!("Scored {} rows in {:?}", table.row_count(), score_start.elapsed());

        let data = self.serialize(&table, output)?;
        tracing::info!(
            "Exported {:?}, {}KB, total {:?}",
            output,
            data.len() / 1024,
            start.elapsed()
        );

        Ok(ScoredExport {
            table,
            data,
            format: output,
        })
    }
}
