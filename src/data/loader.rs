use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, Float64Array, StringArray};
use arrow::compute::kernels::cast::{cast, cast_with_options, CastOptions};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{Restaurant, RestaurantDataset, Schema};

const NAME: &str = "name";
const CITY: &str = "city";
const RATING: &str = "rating";
const COST: &str = "cost";
const CUISINE: &str = "cuisine";
const ADDRESS: &str = "address";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the restaurant table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one restaurant per line
/// * `.json`    – `[{ "name": ..., "city": ..., ... }, ...]`
/// * `.parquet` – flat table with the same column names
///
/// `name` and `address` are required; `city`, `rating`, `cost` and `cuisine`
/// may be absent, which is recorded in the dataset's [`Schema`].
pub fn load_file(path: &Path) -> Result<RestaurantDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Shared cell handling
// ---------------------------------------------------------------------------

/// Trimmed text, empty cells are missing.
fn text_cell(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_cell(
    raw: Option<&str>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, DatasetError> {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| DatasetError::InvalidNumber {
            row,
            column,
            value: text.to_string(),
        })
}

/// Reject ratings outside 0..=5 and negative or non-finite costs.
fn validate(row: usize, record: Restaurant) -> Result<Restaurant, DatasetError> {
    if let Some(rating) = record.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(DatasetError::OutOfRange {
                row,
                column: RATING,
                value: rating,
                min: 0.0,
                max: 5.0,
            });
        }
    }
    if let Some(cost) = record.cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(DatasetError::OutOfRange {
                row,
                column: COST,
                value: cost,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
    }
    Ok(record)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RestaurantDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let position = |col: &str| headers.iter().position(|h| h == col);

    let name_idx = position(NAME).ok_or(DatasetError::MissingColumn(NAME))?;
    let address_idx = position(ADDRESS).ok_or(DatasetError::MissingColumn(ADDRESS))?;
    let city_idx = position(CITY);
    let rating_idx = position(RATING);
    let cost_idx = position(COST);
    let cuisine_idx = position(CUISINE);

    let schema = Schema {
        has_city: city_idx.is_some(),
        has_rating: rating_idx.is_some(),
        has_cost: cost_idx.is_some(),
        has_cuisine: cuisine_idx.is_some(),
    };

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

        let restaurant = Restaurant {
            name: text_cell(record.get(name_idx)).unwrap_or_default(),
            city: text_cell(cell(city_idx)),
            rating: number_cell(cell(rating_idx), row_no, RATING)?,
            cost: number_cell(cell(cost_idx), row_no, COST)?,
            cuisine: text_cell(cell(cuisine_idx)),
            address: text_cell(record.get(address_idx)).unwrap_or_default(),
        };
        records.push(validate(row_no, restaurant)?);
    }

    Ok(RestaurantDataset::new(records, schema))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
///
/// A column counts as present when any row carries the key.
fn load_json(path: &Path) -> Result<RestaurantDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    let objects = rows
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<Vec<&Map<String, JsonValue>>>>()?;

    let has = |col: &str| objects.iter().any(|obj| obj.contains_key(col));
    if !has(NAME) {
        return Err(DatasetError::MissingColumn(NAME).into());
    }
    if !has(ADDRESS) {
        return Err(DatasetError::MissingColumn(ADDRESS).into());
    }
    let schema = Schema {
        has_city: has(CITY),
        has_rating: has(RATING),
        has_cost: has(COST),
        has_cuisine: has(CUISINE),
    };

    let mut records = Vec::with_capacity(objects.len());

    for (row_no, obj) in objects.iter().enumerate() {
        let restaurant = Restaurant {
            name: json_text(obj.get(NAME)).unwrap_or_default(),
            city: json_text(obj.get(CITY)),
            rating: json_number(obj.get(RATING), row_no, RATING)?,
            cost: json_number(obj.get(COST), row_no, COST)?,
            cuisine: json_text(obj.get(CUISINE)),
            address: json_text(obj.get(ADDRESS)).unwrap_or_default(),
        };
        records.push(validate(row_no, restaurant)?);
    }

    Ok(RestaurantDataset::new(records, schema))
}

fn json_text(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Null => None,
        JsonValue::String(s) => text_cell(Some(s)),
        other => Some(other.to_string()),
    }
}

fn json_number(
    val: Option<&JsonValue>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, DatasetError> {
    match val {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) => number_cell(Some(s), row, column),
        Some(other) => Err(DatasetError::InvalidNumber {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table written by Pandas or Polars.
///
/// Text columns may be any type castable to Utf8, numeric columns any
/// integer or float type (or text holding numbers).
fn load_parquet(path: &Path) -> Result<RestaurantDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let arrow_schema = builder.schema().clone();
    let position = |col: &str| arrow_schema.index_of(col).ok();

    let name_idx = position(NAME).ok_or(DatasetError::MissingColumn(NAME))?;
    let address_idx = position(ADDRESS).ok_or(DatasetError::MissingColumn(ADDRESS))?;
    let city_idx = position(CITY);
    let rating_idx = position(RATING);
    let cost_idx = position(COST);
    let cuisine_idx = position(CUISINE);

    let schema = Schema {
        has_city: city_idx.is_some(),
        has_rating: rating_idx.is_some(),
        has_cost: cost_idx.is_some(),
        has_cuisine: cuisine_idx.is_some(),
    };

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let names = utf8_column(&batch, name_idx, NAME)?;
        let addresses = utf8_column(&batch, address_idx, ADDRESS)?;
        let cities = city_idx
            .map(|i| utf8_column(&batch, i, CITY))
            .transpose()?;
        let cuisines = cuisine_idx
            .map(|i| utf8_column(&batch, i, CUISINE))
            .transpose()?;
        let ratings = rating_idx
            .map(|i| f64_column(&batch, i, RATING))
            .transpose()?;
        let costs = cost_idx.map(|i| f64_column(&batch, i, COST)).transpose()?;

        for row in 0..batch.num_rows() {
            let restaurant = Restaurant {
                name: string_at(&names, row).unwrap_or_default(),
                city: cities.as_ref().and_then(|a| string_at(a, row)),
                rating: ratings.as_ref().and_then(|a| f64_at(a, row)),
                cost: costs.as_ref().and_then(|a| f64_at(a, row)),
                cuisine: cuisines.as_ref().and_then(|a| string_at(a, row)),
                address: string_at(&addresses, row).unwrap_or_default(),
            };
            records.push(validate(row_offset + row, restaurant)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(RestaurantDataset::new(records, schema))
}

// -- Parquet / Arrow helpers --

fn utf8_column(batch: &RecordBatch, idx: usize, column: &str) -> Result<StringArray> {
    let array = cast(batch.column(idx), &DataType::Utf8)
        .with_context(|| format!("column '{column}' cannot be read as text"))?;
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .context("expected StringArray")
}

/// Unparseable values are an error, never silently nulled.
fn f64_column(batch: &RecordBatch, idx: usize, column: &str) -> Result<Float64Array> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    let array = cast_with_options(batch.column(idx), &DataType::Float64, &options)
        .with_context(|| format!("column '{column}' is not numeric"))?;
    array
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .context("expected Float64Array")
}

fn string_at(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        return None;
    }
    text_cell(Some(array.value(row)))
}

fn f64_at(array: &Float64Array, row: usize) -> Option<f64> {
    if array.is_null(row) {
        return None;
    }
    Some(array.value(row))
}
