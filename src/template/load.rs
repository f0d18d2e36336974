use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::Path;

use super::types::{TemplateFile, TemplateRow, RECOGNIZED_COLUMNS};

/// Structural error while reading a template file.
///
/// These abort parsing immediately: a template whose header or required
/// cells are broken cannot be partially compiled.
#[derive(Debug)]
pub enum TemplateError {
    /// A required column is absent from the header.
    MissingColumn { column: String },
    /// A required cell is blank. `row_index` is 1-based over data rows.
    BlankRequiredField { column: String, row_index: usize },
    /// The underlying CSV could not be read or parsed.
    Csv(csv::Error),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MissingColumn { column } => {
                write!(f, "template is missing the required column '{}'", column)
            }
            TemplateError::BlankRequiredField { column, row_index } => {
                write!(
                    f,
                    "row {} has a blank value in the required column '{}'",
                    row_index, column
                )
            }
            TemplateError::Csv(err) => write!(f, "template could not be parsed: {}", err),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for TemplateError {
    fn from(err: csv::Error) -> Self {
        TemplateError::Csv(err)
    }
}

/// Normalize a header cell: case- and whitespace-insensitive, punctuation
/// ignored ("Sub Category", "subCategory" and " SUBCATEGORY " all become
/// "subcategory").
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "true" | "x" | "1"
    )
}

/// Read a template from a CSV file on disk.
pub fn from_csv_path(path: &Path) -> Result<TemplateFile, TemplateError> {
    let csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    parse(csv_reader)
}

/// Read a template from any CSV byte stream.
///
/// The first record is the header. Required columns: `category`,
/// `subcategory`, `fieldname` (after normalization). Each data row must
/// have non-blank `category` and `fieldname` cells; `subcategory` may be
/// blank. No semantic validation happens here.
pub fn from_reader<R: io::Read>(reader: R) -> Result<TemplateFile, TemplateError> {
    let csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    parse(csv_reader)
}

fn parse<R: io::Read>(mut csv_reader: csv::Reader<R>) -> Result<TemplateFile, TemplateError> {
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    for required in ["category", "subcategory", "fieldname"] {
        if !headers.iter().any(|h| h == required) {
            return Err(TemplateError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let mut extra_columns: Vec<String> = Vec::new();
    for header in &headers {
        if !header.is_empty()
            && !RECOGNIZED_COLUMNS.contains(&header.as_str())
            && !extra_columns.contains(header)
        {
            extra_columns.push(header.clone());
        }
    }

    let column = |cells: &BTreeMap<String, String>, name: &str| -> String {
        cells.get(name).cloned().unwrap_or_default()
    };

    let mut rows = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row_index = i + 1;

        let mut cells: BTreeMap<String, String> = BTreeMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if !header.is_empty() {
                cells.insert(header.clone(), value.trim().to_string());
            }
        }

        for required in ["category", "fieldname"] {
            if column(&cells, required).is_empty() {
                return Err(TemplateError::BlankRequiredField {
                    column: required.to_string(),
                    row_index,
                });
            }
        }

        let extra: BTreeMap<String, String> = cells
            .iter()
            .filter(|(k, _)| extra_columns.contains(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        rows.push(TemplateRow {
            row_index,
            category: column(&cells, "category"),
            sub_category: column(&cells, "subcategory"),
            field_name: column(&cells, "fieldname"),
            component: column(&cells, "component"),
            dependency: column(&cells, "dependency"),
            dependency_value: column(&cells, "dependencyvalue"),
            options: column(&cells, "options"),
            unit: column(&cells, "unit"),
            min: column(&cells, "min"),
            max: column(&cells, "max"),
            mandatory: parse_flag(&column(&cells, "mandatory")),
            documents: column(&cells, "documents"),
            explanation: column(&cells, "explanation"),
            extra,
        });
    }

    Ok(TemplateFile::new(rows, extra_columns))
}
