//! CSV export of an enriched series.

use crate::indicators::EnrichedSeries;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer finish failed: {0}")]
    Finish(String),
}

/// Render an enriched series as CSV. Bar columns come first, indicator
/// columns after in stable alphabetical order, so repeated exports of the
/// same data produce identical output. NaN cells are left empty.
pub fn export_series_csv(enriched: &EnrichedSeries) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = vec!["timestamp", "open", "high", "low", "close", "volume"];
    header.extend(enriched.columns.names());
    wtr.write_record(&header)?;

    for (i, bar) in enriched.series.bars.iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(bar.timestamp.to_rfc3339());
        record.push(fmt_cell(bar.open));
        record.push(fmt_cell(bar.high));
        record.push(fmt_cell(bar.low));
        record.push(fmt_cell(bar.close));
        record.push(bar.volume.to_string());
        for name in enriched.columns.names() {
            let value = enriched.columns.value_at(name, i).unwrap_or(f64::NAN);
            record.push(fmt_cell(value));
        }
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Finish(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Finish(e.to_string()))
}

/// Empty cell for NaN, six fixed decimals otherwise.
fn fmt_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{add_indicators, make_bars, IndicatorColumns};
    use crate::domain::{QuoteSeries, Ticker};

    fn enriched_fixture(n: usize) -> EnrichedSeries {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let series = QuoteSeries::new(Ticker::new("CSV"), make_bars(&closes));
        add_indicators(series)
    }

    #[test]
    fn header_lists_bar_columns_then_sorted_indicator_names() {
        let enriched = enriched_fixture(30);
        let csv = export_series_csv(&enriched).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "timestamp,open,high,low,close,volume,\
             bb_lower,bb_middle,bb_upper,ema_20,macd,macd_hist,macd_signal,rsi_14,sma_20,sma_50"
        );
    }

    #[test]
    fn one_row_per_bar() {
        let enriched = enriched_fixture(30);
        let csv = export_series_csv(&enriched).unwrap();
        assert_eq!(csv.lines().count(), 31);
    }

    #[test]
    fn nan_cells_are_empty() {
        let enriched = enriched_fixture(30);
        let csv = export_series_csv(&enriched).unwrap();
        // First data row: every indicator is still warming up.
        let row = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 16);
        for field in &fields[6..] {
            assert_eq!(*field, "");
        }
    }

    #[test]
    fn defined_values_use_six_decimals() {
        let enriched = enriched_fixture(30);
        let csv = export_series_csv(&enriched).unwrap();
        let last = csv.lines().last().unwrap();
        let fields: Vec<&str> = last.split(',').collect();
        // close of the 30th bar is 129, sma_20 is the mean of 110..=129.
        assert_eq!(fields[4], "129.000000");
        let sma_20 = fields[14];
        assert_eq!(sma_20, "119.500000");
    }

    #[test]
    fn volume_stays_integral() {
        let enriched = enriched_fixture(25);
        let csv = export_series_csv(&enriched).unwrap();
        let row = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields[5], "1000");
    }

    #[test]
    fn timestamps_keep_their_utc_offset() {
        let enriched = enriched_fixture(21);
        let csv = export_series_csv(&enriched).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("2024-01-02T16:00:00-05:00"), "{row}");
    }

    #[test]
    fn series_without_indicators_exports_bar_columns_only() {
        let enriched = enriched_fixture(5);
        let csv = export_series_csv(&enriched).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "timestamp,open,high,low,close,volume");
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn export_is_deterministic() {
        let enriched = enriched_fixture(40);
        let first = export_series_csv(&enriched).unwrap();
        let second = export_series_csv(&enriched).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn column_shorter_than_series_pads_with_empty_cells() {
        let closes = [1.0, 2.0, 3.0];
        let series = QuoteSeries::new(Ticker::new("PAD"), make_bars(&closes));
        let mut columns = IndicatorColumns::new();
        columns.insert("stub", vec![1.0]);
        let enriched = EnrichedSeries { series, columns };

        let csv = export_series_csv(&enriched).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert!(rows[1].ends_with(",1.000000"));
        assert!(rows[2].ends_with(','));
        assert!(rows[3].ends_with(','));
    }
}
