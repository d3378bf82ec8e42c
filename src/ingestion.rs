use crate::error::{DecoderError, Result};
use crate::schema::{CellValue, Column, ColumnType, FinancialTable, StatementKind};
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Tokens read as a missing value in delimited files.
const MISSING_VALUE_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_TOKENS: &[&str] = &["True", "TRUE", "true"];
const FALSE_TOKENS: &[&str] = &["False", "FALSE", "false"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(TableFormat::Csv)
        } else if ext.eq_ignore_ascii_case("xlsx") {
            Some(TableFormat::Xlsx)
        } else {
            None
        }
    }
}

/// Loads a statement file. Unsupported extensions yield `Ok(None)`.
pub fn load_table(path: &Path) -> Result<Option<FinancialTable>> {
    let Some(format) = TableFormat::from_path(path) else {
        debug!("Ignoring {} (unsupported extension)", path.display());
        return Ok(None);
    };

    let table = match format {
        TableFormat::Csv => read_csv(std::fs::File::open(path)?)?,
        TableFormat::Xlsx => read_xlsx(path)?,
    };

    info!(
        "Loaded {} ({} columns, {} rows)",
        path.display(),
        table.columns().len(),
        table.row_count()
    );
    Ok(Some(table))
}

pub fn read_csv<R: Read>(reader: R) -> Result<FinancialTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(DecoderError::EmptyTable);
    }

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(DecoderError::MalformedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }
        for (i, column) in raw_columns.iter_mut().enumerate() {
            let field = record.get(i).unwrap_or("");
            let value = if MISSING_VALUE_TOKENS.contains(&field) {
                None
            } else {
                Some(field.to_string())
            };
            column.push(value);
        }
    }

    let columns = clean_headers(headers)
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| infer_text_column(name, raw))
        .collect();

    Ok(FinancialTable::new(columns))
}

/// Reads the first worksheet; the first row holds the column names.
pub fn read_xlsx(path: &Path) -> Result<FinancialTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecoderError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(header_text).collect(),
        None => return Err(DecoderError::EmptyTable),
    };

    let mut cell_columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, column) in cell_columns.iter_mut().enumerate() {
            column.push(row.get(i).map(spreadsheet_cell).unwrap_or(CellValue::Empty));
        }
    }

    let columns = clean_headers(headers)
        .into_iter()
        .zip(cell_columns)
        .map(|(name, cells)| infer_cell_column(name, cells))
        .collect();

    Ok(FinancialTable::new(columns))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => spreadsheet_cell(other).to_string(),
    }
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(v) => CellValue::Integer(*v),
        Data::Float(v) => {
            if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                CellValue::Integer(*v as i64)
            } else {
                CellValue::Float(*v)
            }
        }
        Data::Bool(v) => CellValue::Boolean(*v),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Text(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Blank names become `Unnamed: {index}`; repeats get a `.N` suffix.
fn clean_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut cleaned = Vec::with_capacity(headers.len());

    for (index, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", index)
        } else {
            header
        };

        let mut name = base.clone();
        while seen.contains_key(&name) {
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        seen.insert(name.clone(), 0);
        cleaned.push(name);
    }

    cleaned
}

fn parse_bool(field: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&field) {
        Some(true)
    } else if FALSE_TOKENS.contains(&field) {
        Some(false)
    } else {
        None
    }
}

fn infer_text_column(name: String, raw: Vec<Option<String>>) -> Column {
    let present: Vec<&str> = raw.iter().flatten().map(|s| s.trim()).collect();
    let has_missing = present.len() < raw.len();

    let all_int = present.iter().all(|s| s.parse::<i64>().is_ok());
    let all_float = present.iter().all(|s| s.parse::<f64>().is_ok());
    let all_bool = !present.is_empty() && present.iter().all(|s| parse_bool(s).is_some());

    let column_type = if raw.is_empty() {
        ColumnType::Text
    } else if all_int && !has_missing && !present.is_empty() {
        ColumnType::Integer
    } else if all_float {
        ColumnType::Float
    } else if all_bool {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    };

    let cells = raw
        .into_iter()
        .map(|field| match field {
            None => CellValue::Empty,
            Some(s) => match column_type {
                ColumnType::Integer => s
                    .trim()
                    .parse()
                    .map(CellValue::Integer)
                    .unwrap_or(CellValue::Text(s)),
                ColumnType::Float => s
                    .trim()
                    .parse()
                    .map(CellValue::Float)
                    .unwrap_or(CellValue::Text(s)),
                ColumnType::Boolean => parse_bool(s.trim())
                    .map(CellValue::Boolean)
                    .unwrap_or(CellValue::Text(s)),
                ColumnType::Text => CellValue::Text(s),
            },
        })
        .collect();

    Column {
        name,
        column_type,
        cells,
    }
}

fn infer_cell_column(name: String, cells: Vec<CellValue>) -> Column {
    let present: Vec<&CellValue> = cells.iter().filter(|c| !c.is_empty()).collect();
    let has_missing = present.len() < cells.len();

    let all_int = present.iter().all(|c| matches!(c, CellValue::Integer(_)));
    let all_numeric = present
        .iter()
        .all(|c| matches!(c, CellValue::Integer(_) | CellValue::Float(_)));
    let all_bool =
        !present.is_empty() && present.iter().all(|c| matches!(c, CellValue::Boolean(_)));

    let column_type = if cells.is_empty() {
        ColumnType::Text
    } else if all_int && !has_missing && !present.is_empty() {
        ColumnType::Integer
    } else if all_numeric {
        ColumnType::Float
    } else if all_bool {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    };

    let cells = if column_type == ColumnType::Float {
        cells
            .into_iter()
            .map(|c| match c {
                CellValue::Integer(v) => CellValue::Float(v as f64),
                other => other,
            })
            .collect()
    } else {
        cells
    };

    Column {
        name,
        column_type,
        cells,
    }
}

/// A statement after the loading step, ready for analysis.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedStatement {
    pub kind: StatementKind,
    pub table: Option<FinancialTable>,
    /// User-facing message when the supplied file could not be read.
    pub load_error: Option<String>,
}

impl LoadedStatement {
    pub fn absent(kind: StatementKind) -> Self {
        Self {
            kind,
            table: None,
            load_error: None,
        }
    }
}

/// Loads one upload slot. A read failure stays local to this statement.
pub fn load_statement(kind: StatementKind, path: Option<&Path>) -> LoadedStatement {
    let Some(path) = path else {
        return LoadedStatement::absent(kind);
    };

    match load_table(path) {
        Ok(table) => LoadedStatement {
            kind,
            table,
            load_error: None,
        },
        Err(e) => {
            debug!("{} failed to load from {}: {}", kind.title(), path.display(), e);
            LoadedStatement {
                kind,
                table: None,
                load_error: Some(format!("Error loading file: {}", e)),
            }
        }
    }
}
