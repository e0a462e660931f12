//! Chart and preview data for a scored table: the row-count selector range,
//! a preview window, histograms of both scores and the polarity/subjectivity
//! scatter.

use serde::Serialize;
use crate::config::Config;
use crate::models::{CellValue, ScoredTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySettings {
    /// Lower bound of the preview selector before it is capped by the row count.
    pub preview_min_rows: usize,
    pub preview_default_rows: usize,
    pub histogram_bins: usize,
}

impl SummarySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            preview_min_rows: config.preview_min_rows,
            preview_default_rows: config.preview_default_rows,
            histogram_bins: config.histogram_bins,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewBounds {
    pub min: usize,
    pub max: usize,
}

impl PreviewBounds {
    pub fn clamp(&self, requested: usize) -> usize {
        requested.clamp(self.min, self.max)
    }
}

/// `[min(min_rows, total), total]`, never below 1 unless the table is empty.
pub fn preview_bounds(total: usize, min_rows: usize) -> PreviewBounds {
    if total == 0 {
        return PreviewBounds { min: 0, max: 0 };
    }
    PreviewBounds {
        min: min_rows.max(1).min(total),
        max: total,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Equal-width bins over `[min, max]`; `max` itself lands in the last bin.
    /// Non-finite values are skipped.
    pub fn build<I>(values: I, min: f64, max: f64, bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let bins = bins.max(1);
        let bin_width = (max - min) / bins as f64;
        let mut counts = vec![0; bins];
        for value in values.into_iter().filter(|v| v.is_finite()) {
            let offset = ((value - min) / bin_width).floor();
            let idx = if offset <= 0.0 {
                0
            } else {
                (offset as usize).min(bins - 1)
            };
            counts[idx] += 1;
        }
        Self {
            min,
            max,
            bin_width,
            counts,
        }
    }

    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub polarity: f64,
    pub subjectivity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentSummary {
    pub row_count: usize,
    /// Header of the preview rows, score columns included.
    pub columns: Vec<String>,
    pub preview_bounds: PreviewBounds,
    pub preview_rows: usize,
    pub preview: Vec<Vec<CellValue>>,
    pub mean_polarity: f64,
    pub mean_subjectivity: f64,
    pub polarity_histogram: Histogram,
    pub subjectivity_histogram: Histogram,
    pub scatter: Vec<ScatterPoint>,
}

pub fn summarize(
    table: &ScoredTable,
    requested_rows: Option<usize>,
    settings: &SummarySettings,
) -> SentimentSummary {
    let row_count = table.row_count();
    let bounds = preview_bounds(row_count, settings.preview_min_rows);
    let preview_rows = bounds.clamp(requested_rows.unwrap_or(settings.preview_default_rows));

    let (columns, mut rows) = table.export_rows();
    rows.truncate(preview_rows);

    let scatter: Vec<ScatterPoint> = table
        .rows()
        .iter()
        .map(|row| {
            let s = row.sentiment();
            ScatterPoint {
                polarity: s.polarity,
                subjectivity: s.subjectivity,
            }
        })
        .collect();

    let (mean_polarity, mean_subjectivity) = if scatter.is_empty() {
        (0.0, 0.0)
    } else {
        let n = scatter.len() as f64;
        (
            scatter.iter().map(|p| p.polarity).sum::<f64>() / n,
            scatter.iter().map(|p| p.subjectivity).sum::<f64>() / n,
        )
    };

    SentimentSummary {
        row_count,
        columns,
        preview_bounds: bounds,
        preview_rows,
        preview: rows,
        mean_polarity,
        mean_subjectivity,
        polarity_histogram: Histogram::build(
            scatter.iter().map(|p| p.polarity),
            -1.0,
            1.0,
            settings.histogram_bins,
        ),
        subjectivity_histogram: Histogram::build(
            scatter.iter().map(|p| p.subjectivity),
            0.0,
            1.0,
            settings.histogram_bins,
        ),
        scatter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScoredRow, Sentiment};

    fn settings() -> SummarySettings {
        SummarySettings {
            preview_min_rows: 1,
            preview_default_rows: 10,
            histogram_bins: 4,
        }
    }

    fn table(scores: &[(f64, f64)]) -> ScoredTable {
        ScoredTable::new(
            vec!["text".into()],
            scores
                .iter()
                .enumerate()
                .map(|(i, (p, s))| {
                    ScoredRow::new(
                        vec![CellValue::String(format!("row {}", i))],
                        Sentiment::new(*p, *s),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn bounds_follow_the_configured_minimum() {
        assert_eq!(preview_bounds(0, 1), PreviewBounds { min: 0, max: 0 });
        assert_eq!(preview_bounds(50, 1), PreviewBounds { min: 1, max: 50 });
        assert_eq!(preview_bounds(50, 10), PreviewBounds { min: 10, max: 50 });
        assert_eq!(preview_bounds(4, 10), PreviewBounds { min: 4, max: 4 });
        assert_eq!(preview_bounds(4, 0), PreviewBounds { min: 1, max: 4 });
    }

    #[test]
    fn histogram_edges() {
        let h = Histogram::build([-1.0, -0.5, 0.0, 0.49, 1.0, f64::NAN], -1.0, 1.0, 4);
        assert_eq!(h.counts, vec![1, 1, 2, 1]);
        assert_eq!(h.total(), 5);
        assert!((h.bin_width - 0.5).abs() < 1e-12);
    }

    #[test]
    fn summary_clamps_requested_preview() {
        let t = table(&[(0.5, 0.6), (-0.8, 0.9), (0.0, 0.0)]);
        let summary = summarize(&t, Some(100), &settings());
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.preview_rows, 3);
        assert_eq!(summary.columns, vec!["text", "polarity", "subjectivity"]);
        assert_eq!(summary.preview[1][1], CellValue::Float(-0.8));

        let summary = summarize(&t, Some(0), &settings());
        assert_eq!(summary.preview_rows, 1);
        assert_eq!(summary.preview.len(), 1);
    }

    #[test]
    fn summary_charts_cover_every_row() {
        let t = table(&[(0.5, 0.6), (-0.8, 0.9), (0.0, 0.0)]);
        let summary = summarize(&t, None, &settings());
        assert_eq!(summary.scatter.len(), 3);
        assert_eq!(summary.polarity_histogram.total(), 3);
        assert_eq!(summary.subjectivity_histogram.total(), 3);
        assert!((summary.mean_polarity - (-0.1)).abs() < 1e-9);
        assert!((summary.mean_subjectivity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_table_summary() {
        let summary = summarize(&table(&[]), Some(5), &settings());
        assert_eq!(summary.preview_rows, 0);
        assert!(summary.preview.is_empty());
        assert_eq!(summary.mean_polarity, 0.0);
    }
}
