use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{columns, LaunchDataset, LaunchRecord, Outcome};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; extra columns are ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Any schema problem or an empty table is an error; the caller treats it as
/// fatal.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    };

    if records.is_empty() {
        return Err(DataError::Empty.into());
    }
    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Row validation shared by all formats
// ---------------------------------------------------------------------------

/// One row as it appears in text formats, before validation. `class` is read
/// as a float so both `1` and `1.0` are accepted.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
    #[serde(rename = "Booster Version")]
    booster_version: String,
}

impl RawRow {
    fn validate(self, row: usize) -> Result<LaunchRecord, DataError> {
        Ok(LaunchRecord {
            launch_site: self.launch_site,
            payload_mass_kg: validate_payload(row, self.payload_mass_kg)?,
            outcome: validate_outcome(row, self.class)?,
            booster_version_category: self.booster_version_category,
            booster_version: self.booster_version,
        })
    }
}

fn validate_payload(row: usize, value: f64) -> Result<f64, DataError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DataError::InvalidPayload { row, value })
    }
}

fn validate_outcome(row: usize, value: f64) -> Result<Outcome, DataError> {
    if value == 0.0 {
        Ok(Outcome::Failure)
    } else if value == 1.0 {
        Ok(Outcome::Success)
    } else {
        Err(DataError::InvalidOutcome {
            row,
            value: value.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Only the five launch columns
/// are read; anything else in the file (flight number, orbit, ...) is
/// skipped.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in columns::REQUIRED {
        if !headers.iter().any(|h| h == col) {
            return Err(DataError::MissingColumn(col).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.validate(row_no)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0",
///     "Booster Version": "F9 v1.0  B0003"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let rows: Vec<RawRow> = serde_json::from_str(&text).context("parsing JSON launch records")?;

    rows.into_iter()
        .enumerate()
        .map(|(i, raw)| raw.validate(i).map_err(anyhow::Error::from))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per launch field.
///
/// Payload may be stored as any float or integer type, `class` as an integer
/// or float; the string columns as Utf8 or LargeUtf8.  Works with files
/// written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = column_by_name(&batch, columns::LAUNCH_SITE)?;
        let payload_col = column_by_name(&batch, columns::PAYLOAD_MASS)?;
        let class_col = column_by_name(&batch, columns::CLASS)?;
        let category_col = column_by_name(&batch, columns::BOOSTER_CATEGORY)?;
        let version_col = column_by_name(&batch, columns::BOOSTER_VERSION)?;

        for row in 0..batch.num_rows() {
            // Row numbers continue across batches.
            let row_no = records.len();
            let payload = numeric_at(payload_col, row, row_no, columns::PAYLOAD_MASS)?;
            let class = numeric_at(class_col, row, row_no, columns::CLASS)?;

            records.push(LaunchRecord {
                launch_site: string_at(site_col, row, row_no, columns::LAUNCH_SITE)?,
                payload_mass_kg: validate_payload(row_no, payload)?,
                outcome: validate_outcome(row_no, class)?,
                booster_version_category: string_at(
                    category_col,
                    row,
                    row_no,
                    columns::BOOSTER_CATEGORY,
                )?,
                booster_version: string_at(version_col, row, row_no, columns::BOOSTER_VERSION)?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> Result<&'a Arc<dyn Array>, DataError> {
    batch
        .schema()
        .index_of(name)
        .map(|idx| batch.column(idx))
        .map_err(|_| DataError::MissingColumn(name))
}

/// Read a numeric cell of any supported width as `f64`.
fn numeric_at(
    col: &Arc<dyn Array>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<f64, DataError> {
    if col.is_null(row) {
        return Err(DataError::NullValue { row: row_no, column });
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        Err(DataError::ColumnType {
            column,
            found: format!("{:?}", col.data_type()),
            expected: "a numeric type",
        })
    }
}

/// Read a Utf8 or LargeUtf8 cell.
fn string_at(
    col: &Arc<dyn Array>,
    row: usize,
    row_no: usize,
    column: &'static str,
) -> Result<String, DataError> {
    if col.is_null(row) {
        return Err(DataError::NullValue { row: row_no, column });
    }
    match col.data_type() {
        DataType::Utf8 => match col.as_any().downcast_ref::<StringArray>() {
            Some(s) => Ok(s.value(row).to_string()),
            None => Err(DataError::ColumnType {
                column,
                found: "Utf8".into(),
                expected: "Utf8",
            }),
        },
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(DataError::ColumnType {
            column,
            found: format!("{other:?}"),
            expected: "Utf8 or LargeUtf8",
        }),
    }
}
