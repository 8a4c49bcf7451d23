//! Dataset payloads and descriptors
//!
//! The controller never interprets record values. It only needs to know how
//! many records and fields a dataset has, and whether an uploaded file name
//! carries an accepted spreadsheet extension.

use crate::error::WorkflowError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    Upload,
    Demo,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Upload => write!(f, "upload"),
            DatasetSource::Demo => write!(f, "demo"),
        }
    }
}

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Allowed extensions, lowercase with the leading dot
    pub const ALLOWED_EXTENSIONS: [&'static str; 3] = [".csv", ".xlsx", ".xls"];

    /// Detect the format from a file name's last extension (case-insensitive).
    ///
    /// # Errors
    /// `WorkflowError::UnsupportedFormat` when the name has no extension or
    /// one outside the allow-list.
    pub fn detect(file_name: &str) -> Result<FileFormat, WorkflowError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xlsx") => Ok(FileFormat::Xlsx),
            Some("xls") => Ok(FileFormat::Xls),
            _ => Err(WorkflowError::UnsupportedFormat {
                file_name: file_name.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => ".csv",
            FileFormat::Xlsx => ".xlsx",
            FileFormat::Xls => ".xls",
        }
    }
}

/// What the controller knows about a loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// File name shown to the user
    pub name: String,
    /// Number of records
    pub records: usize,
    /// Number of named fields per record
    pub fields: usize,
    /// Upload size, when known
    pub size_bytes: Option<u64>,
}

impl DatasetDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, records: usize, fields: usize) -> Self {
        Self {
            name: name.into(),
            records,
            fields,
            size_bytes: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Built-in demo survey: 15 records, 8 fields
    #[must_use]
    pub fn demo() -> Self {
        crate::fixtures::demo_survey().descriptor()
    }

    /// Size in kilobytes with one decimal, e.g. `"12.3 KB"`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_label(&self) -> Option<String> {
        self.size_bytes
            .map(|bytes| format!("{:.1} KB", bytes as f64 / 1024.0))
    }
}

/// Semantic kind of a dataset field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn numeric() -> Self {
        Self {
            kind: FieldKind::Numeric,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn categorical() -> Self {
        Self {
            kind: FieldKind::Categorical,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// One survey response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub id: u32,
    pub age: Option<u32>,
    pub region: String,
    pub income: Option<u32>,
    pub education: String,
    pub response: String,
    pub gender: String,
    pub occupation: String,
}

impl SurveyRecord {
    /// Number of nullable fields without a value
    #[must_use]
    pub fn missing_values(&self) -> usize {
        usize::from(self.age.is_none()) + usize::from(self.income.is_none())
    }
}

/// Ordered collection of uniformly shaped survey records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub schema: IndexMap<String, FieldSpec>,
    pub records: Vec<SurveyRecord>,
}

impl Dataset {
    /// Field layout shared by every survey record
    #[must_use]
    pub fn survey_schema() -> IndexMap<String, FieldSpec> {
        [
            ("id", FieldSpec::numeric()),
            ("age", FieldSpec::numeric().nullable()),
            ("region", FieldSpec::categorical()),
            ("income", FieldSpec::numeric().nullable()),
            ("education", FieldSpec::categorical()),
            ("response", FieldSpec::categorical()),
            ("gender", FieldSpec::categorical()),
            ("occupation", FieldSpec::categorical()),
        ]
        .into_iter()
        .map(|(name, spec)| (name.to_string(), spec))
        .collect()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.schema.len()
    }

    /// Total number of missing values across all records
    #[must_use]
    pub fn missing_values(&self) -> usize {
        self.records.iter().map(SurveyRecord::missing_values).sum()
    }

    /// First `rows` records for display
    #[must_use]
    pub fn preview(&self, rows: usize) -> &[SurveyRecord] {
        &self.records[..rows.min(self.records.len())]
    }

    #[must_use]
    pub fn descriptor(&self) -> DatasetDescriptor {
        DatasetDescriptor::new(self.name.clone(), self.record_count(), self.field_count())
    }
}
