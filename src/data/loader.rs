use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use log::{debug, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Required columns as `(source name, English alias)`.
pub const REQUIRED_COLUMNS: [(&str, &str); 9] = [
    ("ano", "year"),
    ("senioridade", "seniority"),
    ("contrato", "contract_type"),
    ("tamanho_empresa", "company_size"),
    ("cargo", "role"),
    ("salario", "salary"),
    ("usd", "salary_usd"),
    ("remoto", "remote_ratio"),
    ("residencia_iso3", "residence_iso3"),
];

/// Fail fast if any required column is absent under both of its names.
fn validate_columns<'a, I>(names: I) -> Result<(), LoadError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = names.into_iter().collect();
    for (name, alias) in REQUIRED_COLUMNS {
        if !present.iter().any(|h| *h == name || *h == alias) {
            return Err(LoadError::MissingColumn { column: name });
        }
    }
    Ok(())
}

/// Reject rows that parsed but still break the data contract.
/// `row` is the 1-based data row number.
fn validate_record(row: usize, rec: SalaryRecord) -> Result<SalaryRecord, LoadError> {
    let malformed = |reason: String| LoadError::MalformedRow { row, reason };

    if !rec.salary.is_finite() {
        return Err(malformed(format!("salary is not a finite number ({})", rec.salary)));
    }
    if !rec.usd.is_finite() {
        return Err(malformed(format!("usd is not a finite number ({})", rec.usd)));
    }

    let text_fields = [
        ("senioridade", &rec.seniority),
        ("contrato", &rec.contract_type),
        ("tamanho_empresa", &rec.company_size),
        ("cargo", &rec.role),
        ("remoto", &rec.remote),
        ("residencia_iso3", &rec.residence_iso3),
    ];
    if let Some((name, _)) = text_fields.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(malformed(format!("empty value in '{name}'")));
    }

    Ok(rec)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a local file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per line (the source format)
/// * `.json`    – `[{ "ano": 2024, "senioridade": "senior", ... }, ...]`
/// * `.parquet` – flat columns named like the CSV header
pub fn load_file(path: &Path) -> Result<SalaryDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv_reader(File::open(path)?),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV from any reader. Extra columns are ignored; fields are trimmed.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<SalaryDataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    debug!("CSV headers: {:?}", headers);
    validate_columns(headers.iter())?;

    let mut records = Vec::new();
    for (i, result) in csv_reader.deserialize::<SalaryRecord>().enumerate() {
        let row = i + 1;
        let rec = result.map_err(|e| {
            if e.is_io_error() {
                LoadError::Csv(e)
            } else {
                LoadError::MalformedRow {
                    row,
                    reason: e.to_string(),
                }
            }
        })?;
        records.push(validate_record(row, rec)?);
    }

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, i.e. `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<SalaryDataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let rows: Vec<JsonValue> = serde_json::from_str(&text)?;

    if let Some(first) = rows.first() {
        let keys = first
            .as_object()
            .map(|obj| obj.keys().map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default();
        validate_columns(keys)?;
    }

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, mut value)| {
            let row = i + 1;
            stringify_text_fields(&mut value);
            let rec: SalaryRecord =
                serde_json::from_value(value).map_err(|e| LoadError::MalformedRow {
                    row,
                    reason: e.to_string(),
                })?;
            validate_record(row, rec)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SalaryDataset::from_records(records))
}

/// Numbers in text columns (e.g. `"remoto": 100`) become strings, the way
/// the CSV reader already sees them.
fn stringify_text_fields(value: &mut JsonValue) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    let [_, seniority, contract, size, role, _, _, remote, iso3] = REQUIRED_COLUMNS;
    for (name, alias) in [seniority, contract, size, role, remote, iso3] {
        for key in [name, alias] {
            if let Some(v) = obj.get_mut(key).filter(|v| v.is_number()) {
                *v = JsonValue::String(v.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Numeric columns may be any integer or float type and string columns
/// Utf8 or LargeUtf8; everything is cast to the record's field types.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<SalaryDataset, LoadError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    validate_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();
        records.extend(records_from_batch(&batch, offset)?);
    }

    Ok(SalaryDataset::from_records(records))
}

/// Resolve a column by its source name or alias.
fn find_column<'b>(
    batch: &'b RecordBatch,
    column: (&'static str, &str),
) -> Result<&'b ArrayRef, LoadError> {
    let schema = batch.schema_ref();
    let idx = schema
        .index_of(column.0)
        .or_else(|_| schema.index_of(column.1))
        .map_err(|_| LoadError::MissingColumn { column: column.0 })?;
    Ok(batch.column(idx))
}

/// Resolve a column and cast it to `to`.
fn column_as(
    batch: &RecordBatch,
    column: (&'static str, &str),
    to: &DataType,
) -> Result<ArrayRef, LoadError> {
    let array = find_column(batch, column)?;
    if array.data_type() == to {
        Ok(array.clone())
    } else {
        Ok(cast(array, to)?)
    }
}

/// A float year column must hold whole numbers; `cast` would truncate them.
fn check_whole_years(array: &ArrayRef, offset: usize) -> Result<(), LoadError> {
    if !array.data_type().is_floating() {
        return Ok(());
    }
    let floats = cast(array, &DataType::Float64)?;
    for (i, value) in floats.as_primitive::<Float64Type>().iter().enumerate() {
        if let Some(v) = value {
            if !v.is_finite() || v.fract() != 0.0 {
                return Err(LoadError::MalformedRow {
                    row: offset + i + 1,
                    reason: format!("ano is not a whole number ({v})"),
                });
            }
        }
    }
    Ok(())
}

fn records_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<SalaryRecord>, LoadError> {
    let [year, seniority, contract, size, role, salary, usd, remote, iso3] = REQUIRED_COLUMNS;

    check_whole_years(find_column(batch, year)?, offset)?;
    let year = column_as(batch, year, &DataType::Int64)?;
    let salary = column_as(batch, salary, &DataType::Float64)?;
    let usd = column_as(batch, usd, &DataType::Float64)?;
    let text: Vec<ArrayRef> = [seniority, contract, size, role, remote, iso3]
        .into_iter()
        .map(|col| column_as(batch, col, &DataType::Utf8))
        .collect::<Result<_, _>>()?;

    let year = year.as_primitive::<Int64Type>();
    let salary = salary.as_primitive::<Float64Type>();
    let usd = usd.as_primitive::<Float64Type>();
    let text: Vec<_> = text.iter().map(|a| a.as_string::<i32>()).collect();

    let mut out = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let row = offset + i + 1;
        let has_null = year.is_null(i)
            || salary.is_null(i)
            || usd.is_null(i)
            || text.iter().any(|a| a.is_null(i));
        if has_null {
            warn!("Parquet row {row} has null fields");
            return Err(LoadError::MalformedRow {
                row,
                reason: "null value in a required column".to_string(),
            });
        }

        let rec = SalaryRecord {
            year: year.value(i),
            seniority: text[0].value(i).to_string(),
            contract_type: text[1].value(i).to_string(),
            company_size: text[2].value(i).to_string(),
            role: text[3].value(i).to_string(),
            salary: salary.value(i),
            usd: usd.value(i),
            remote: text[4].value(i).to_string(),
            residence_iso3: text[5].value(i).to_string(),
        };
        out.push(validate_record(row, rec)?);
    }
    Ok(out)
}
