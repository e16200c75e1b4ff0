use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Column names of the source dataset
// ---------------------------------------------------------------------------

// CSV headers, JSON object keys, and parquet field names all use the original
// dataset's column names.
pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";

// Optional columns, carried into the records table when present.
pub const FLIGHT_COLUMN: &str = "Flight Number";
pub const BOOSTER_COLUMN: &str = "Booster Version";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";

/// Structured load failures callers can match on; everything else is reported
/// through `anyhow` context.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{name}'")]
    MissingColumn { name: &'static str },

    #[error("row {row}: {reason}")]
    Row { row: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-records dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the dataset's column names (canonical)
/// * `.json`    – records-oriented array, `[{ "Launch Site": ..., ... }, ...]`,
///                the shape produced by `df.to_json(orient='records')`
/// * `.parquet` – flat schema with one column per field
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

/// Validation shared by all three loaders: one parsed row in, one record out.
fn build_record(
    row: usize,
    site: String,
    payload_mass_kg: f64,
    class: i64,
    flight_number: Option<u32>,
    booster_version: Option<String>,
    booster_category: Option<String>,
) -> Result<LaunchRecord, LoadError> {
    if site.trim().is_empty() {
        return Err(LoadError::Row {
            row,
            reason: "empty launch site".to_string(),
        });
    }
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        return Err(LoadError::Row {
            row,
            reason: format!("payload mass {payload_mass_kg} is not a non-negative number"),
        });
    }
    let outcome = Outcome::from_class(class).ok_or_else(|| LoadError::Row {
        row,
        reason: format!("class {class} is outside {{0, 1}}"),
    })?;

    Ok(LaunchRecord {
        site,
        payload_mass_kg,
        outcome,
        flight_number,
        booster_version,
        booster_category,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per record.
/// Unknown columns are ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let required =
        |name: &'static str| position(name).ok_or(LoadError::MissingColumn { name });

    let site_idx = required(SITE_COLUMN)?;
    let payload_idx = required(PAYLOAD_COLUMN)?;
    let class_idx = required(CLASS_COLUMN)?;
    let flight_idx = position(FLIGHT_COLUMN);
    let booster_idx = position(BOOSTER_COLUMN);
    let category_idx = position(BOOSTER_CATEGORY_COLUMN);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let site = row.get(site_idx).unwrap_or("").to_string();
        let payload_raw = row.get(payload_idx).unwrap_or("");
        let payload = payload_raw
            .trim()
            .parse::<f64>()
            .map_err(|_| LoadError::Row {
                row: row_no,
                reason: format!("'{payload_raw}' is not a payload mass"),
            })?;
        let class_raw = row.get(class_idx).unwrap_or("");
        let class = class_raw
            .trim()
            .parse::<i64>()
            .map_err(|_| LoadError::Row {
                row: row_no,
                reason: format!("'{class_raw}' is not an integer class"),
            })?;

        let flight_number = flight_idx
            .and_then(|i| row.get(i))
            .and_then(|s| s.trim().parse::<u32>().ok());
        let booster_version = booster_idx
            .and_then(|i| row.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let booster_category = category_idx
            .and_then(|i| row.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        records.push(build_record(
            row_no,
            site,
            payload,
            class,
            flight_number,
            booster_version,
            booster_category,
        )?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 6104.96,
///     "Booster Version": "F9 v1.0 B0003",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (row_no, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row_no} is not a JSON object"))?;

        let site = obj
            .get(SITE_COLUMN)
            .ok_or(LoadError::MissingColumn { name: SITE_COLUMN })?
            .as_str()
            .ok_or_else(|| LoadError::Row {
                row: row_no,
                reason: format!("'{SITE_COLUMN}' is not a string"),
            })?
            .to_string();
        let payload = obj
            .get(PAYLOAD_COLUMN)
            .ok_or(LoadError::MissingColumn { name: PAYLOAD_COLUMN })?
            .as_f64()
            .ok_or_else(|| LoadError::Row {
                row: row_no,
                reason: format!("'{PAYLOAD_COLUMN}' is not a number"),
            })?;
        let class = obj
            .get(CLASS_COLUMN)
            .ok_or(LoadError::MissingColumn { name: CLASS_COLUMN })?
            .as_i64()
            .ok_or_else(|| LoadError::Row {
                row: row_no,
                reason: format!("'{CLASS_COLUMN}' is not an integer"),
            })?;

        let flight_number = obj
            .get(FLIGHT_COLUMN)
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok());
        let booster_version = obj
            .get(BOOSTER_COLUMN)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let booster_category = obj
            .get(BOOSTER_CATEGORY_COLUMN)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        records.push(build_record(
            row_no,
            site,
            payload,
            class,
            flight_number,
            booster_version,
            booster_category,
        )?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema: one flat column per field, named as in CSV.  Strings may
/// be Utf8 or LargeUtf8; numeric columns may be Int32/Int64/Float32/Float64.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let required = |name: &'static str| {
            schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn { name })
        };
        let site_col = batch.column(required(SITE_COLUMN)?);
        let payload_col = batch.column(required(PAYLOAD_COLUMN)?);
        let class_col = batch.column(required(CLASS_COLUMN)?);
        let flight_col = schema.index_of(FLIGHT_COLUMN).ok().map(|i| batch.column(i));
        let booster_col = schema.index_of(BOOSTER_COLUMN).ok().map(|i| batch.column(i));
        let category_col = schema
            .index_of(BOOSTER_CATEGORY_COLUMN)
            .ok()
            .map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let site = string_at(site_col, row).ok_or_else(|| LoadError::Row {
                row: row_no,
                reason: format!("missing value in '{SITE_COLUMN}'"),
            })?;
            let payload = f64_at(payload_col, row).ok_or_else(|| LoadError::Row {
                row: row_no,
                reason: format!("missing or non-numeric value in '{PAYLOAD_COLUMN}'"),
            })?;
            let class = i64_at(class_col, row).ok_or_else(|| LoadError::Row {
                row: row_no,
                reason: format!("missing or non-integer value in '{CLASS_COLUMN}'"),
            })?;

            let flight_number = flight_col
                .and_then(|c| i64_at(c, row))
                .and_then(|v| u32::try_from(v).ok());
            let booster_version = booster_col.and_then(|c| string_at(c, row));
            let booster_category = category_col.and_then(|c| string_at(c, row));

            records.push(build_record(
                row_no,
                site,
                payload,
                class,
                flight_number,
                booster_version,
                booster_category,
            )?);
            row_no += 1;
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell from an Arrow column, if present.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|arr| arr.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

/// Extract a numeric cell as `f64`, widening from the integer types.
fn f64_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64),
        _ => None,
    }
}

/// Extract an integer cell as `i64`.
fn i64_at(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row)),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_field_for_field() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.csv",
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,0,6104.959412,F9 v1.0 B0003,v1.0\n\
             2,VAFB SLC-4E,1,500,F9 FT B1038,FT\n",
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert!((first.payload_mass_kg - 6104.959412).abs() < 1e-9);
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0 B0003"));
        assert_eq!(first.booster_category.as_deref(), Some("v1.0"));

        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.payload_bounds, (500.0, 6104.959412));
    }

    #[test]
    fn csv_without_required_column_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.csv", "Launch Site,class\nKSC LC-39A,1\n");

        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingColumn { name }) => assert_eq!(*name, PAYLOAD_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_with_class_outside_zero_one_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad_class.csv",
            "Launch Site,class,Payload Mass (kg)\nKSC LC-39A,3,1200\n",
        );

        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::Row { row, .. }) => assert_eq!(*row, 0),
            other => panic!("expected Row error, got {other:?}"),
        }
    }

    #[test]
    fn csv_with_negative_payload_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad_payload.csv",
            "Launch Site,class,Payload Mass (kg)\nKSC LC-39A,1,-40\n",
        );
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn csv_with_empty_site_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "bad_site.csv",
            "Launch Site,class,Payload Mass (kg)\n ,1,1200\n",
        );

        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::Row { row, reason }) => {
                assert_eq!(*row, 0);
                assert!(reason.contains("site"));
            }
            other => panic!("expected Row error, got {other:?}"),
        }
    }

    #[test]
    fn csv_with_header_only_loads_an_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "empty.csv",
            "Launch Site,class,Payload Mass (kg)\n",
        );

        let ds = load_file(&path).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds, (0.0, 0.0));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "minimal.csv",
            "Launch Site,class,Payload Mass (kg)\nCCAFS SLC-40,1,2500\n",
        );

        let ds = load_file(&path).unwrap();
        let record = &ds.records[0];
        assert_eq!(record.flight_number, None);
        assert_eq!(record.booster_version, None);
        assert_eq!(record.booster_category, None);
    }

    #[test]
    fn json_records_load_field_for_field() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "launches.json",
            r#"[
                {"Flight Number": 7, "Launch Site": "KSC LC-39A", "class": 1,
                 "Payload Mass (kg)": 9600.0, "Booster Version": "F9 B5 B1051", "Booster Version Category": "B5"},
                {"Launch Site": "CCAFS LC-40", "class": 0, "Payload Mass (kg)": 350}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flight_number, Some(7));
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].site, "CCAFS LC-40");
        assert_eq!(ds.records[1].booster_version, None);
        assert_eq!(ds.payload_bounds, (350.0, 9600.0));
    }

    #[test]
    fn json_row_without_required_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "broken.json",
            r#"[{"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 100}]"#,
        );

        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingColumn { name }) => assert_eq!(*name, CLASS_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "launches.txt", "not a table");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn parquet_round_trips_through_arrow_writer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(FLIGHT_COLUMN, DataType::Int64, false),
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(CLASS_COLUMN, DataType::Int64, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
            Field::new(BOOSTER_COLUMN, DataType::Utf8, false),
            Field::new(BOOSTER_CATEGORY_COLUMN, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![10, 11])),
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "VAFB SLC-4E"])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(Float64Array::from(vec![4428.0, 476.0])),
                Arc::new(StringArray::from(vec!["F9 FT B1021", "F9 v1.1 B1017"])),
                Arc::new(StringArray::from(vec!["FT", "v1.1"])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "CCAFS LC-40");
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[0].flight_number, Some(10));
        assert_eq!(ds.records[1].payload_mass_kg, 476.0);
        assert_eq!(ds.records[1].booster_category.as_deref(), Some("v1.1"));
    }

    #[test]
    fn parquet_without_required_column_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_class.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![2000.0])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingColumn { name }) => assert_eq!(*name, CLASS_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
