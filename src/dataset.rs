//! Dataset access for the recommender.
//!
//! Reading files and deciding column types belong to the caller; the core
//! only needs the [`DatasetSchema`] seam. [`GeoFrame`] is a small in-memory
//! implementation with a point geometry column.

use crate::channel::ChannelFamily;
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Classification of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Numeric-valued column.
    Quantitative,
    /// Label-valued column.
    Categorical,
    /// Neither (empty or mixed); receives no encodings.
    Unknown,
}

impl ColumnKind {
    /// Channel family for this kind, if any.
    #[must_use]
    pub fn family(self) -> Option<ChannelFamily> {
        match self {
            ColumnKind::Quantitative => Some(ChannelFamily::Quantitative),
            ColumnKind::Categorical => Some(ChannelFamily::Categorical),
            ColumnKind::Unknown => None,
        }
    }
}

/// Schema view of a geospatial dataset.
pub trait DatasetSchema {
    /// Attribute column names (the geometry column excluded).
    fn columns(&self) -> Vec<&str>;

    /// Classify a column. Unknown names classify as [`ColumnKind::Unknown`].
    fn column_kind(&self, name: &str) -> ColumnKind;

    /// Whether the dataset carries spatial geometry.
    fn has_geometry(&self) -> bool;

    /// Check if a column exists.
    fn has_column(&self, name: &str) -> bool {
        self.columns().contains(&name)
    }
}

/// Decides whether a requested variable is quantitative or categorical.
pub trait VariableClassifier {
    /// Classify `variable`, failing with [`Error::InvalidVariable`] if it
    /// does not exist.
    fn classify(&self, variable: &str) -> Result<ColumnKind>;
}

impl<F> VariableClassifier for F
where
    F: Fn(&str) -> Result<ColumnKind>,
{
    fn classify(&self, variable: &str) -> Result<ColumnKind> {
        self(variable)
    }
}

/// Classifier backed by a [`DatasetSchema`].
#[derive(Debug, Clone, Copy)]
pub struct SchemaClassifier<'a, S: ?Sized>(pub &'a S);

impl<S: DatasetSchema + ?Sized> VariableClassifier for SchemaClassifier<'_, S> {
    fn classify(&self, variable: &str) -> Result<ColumnKind> {
        if !self.0.has_column(variable) {
            return Err(Error::InvalidVariable(variable.to_string()));
        }
        Ok(self.0.column_kind(variable))
    }
}

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Label used for legends and split passes.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            DataValue::Number(n) => Some(n.to_string()),
            DataValue::Text(s) => Some(s.clone()),
            DataValue::Null => None,
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<DataValue>,
}

/// An in-memory columnar point dataset.
///
/// Columns keep insertion order. Adding a column with an existing name
/// replaces it.
#[derive(Debug, Clone, Default)]
pub struct GeoFrame {
    columns: Vec<Column>,
    geometry: Option<Vec<Point>>,
    n_rows: usize,
}

impl GeoFrame {
    /// Create a new empty frame without geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach point geometry, one point per row.
    #[must_use]
    pub fn with_geometry(mut self, points: Vec<Point>) -> Self {
        self.n_rows = self.n_rows.max(points.len());
        self.geometry = Some(points);
        self
    }

    /// Add a column of values.
    pub fn add_column(&mut self, name: &str, values: Vec<DataValue>) {
        self.n_rows = self.n_rows.max(values.len());
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == name) {
            col.values = values;
        } else {
            self.columns.push(Column {
                name: name.to_string(),
                values,
            });
        }
    }

    /// Add a numeric column.
    pub fn add_column_f32(&mut self, name: &str, data: &[f32]) {
        self.add_column(name, data.iter().map(|&v| DataValue::Number(v)).collect());
    }

    /// Add a text column.
    pub fn add_column_str(&mut self, name: &str, data: &[&str]) {
        self.add_column(name, data.iter().map(|&s| DataValue::from(s)).collect());
    }

    /// Point geometry, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&[Point]> {
        self.geometry.as_deref()
    }

    /// Get a column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Get a column as f32 values, skipping non-numbers.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.get(name)
            .map(|col| col.iter().filter_map(DataValue::as_f32).collect())
    }

    /// Get number of rows.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of attribute columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Distinct non-null labels of a column, in first-seen order.
    #[must_use]
    pub fn distinct_values(&self, name: &str) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for label in self.get(name).unwrap_or_default().iter().filter_map(DataValue::label) {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Minimum and maximum of a numeric column.
    #[must_use]
    pub fn numeric_extent(&self, name: &str) -> Option<(f32, f32)> {
        let data = self.get_f32(name)?;
        if data.is_empty() {
            return None;
        }
        let min = data.iter().copied().fold(f32::INFINITY, f32::min);
        let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Some((min, max))
    }
}

impl DatasetSchema for GeoFrame {
    fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    fn column_kind(&self, name: &str) -> ColumnKind {
        let Some(values) = self.get(name) else {
            return ColumnKind::Unknown;
        };
        let mut numbers = 0usize;
        let mut texts = 0usize;
        for v in values {
            match v {
                DataValue::Number(_) => numbers += 1,
                DataValue::Text(_) => texts += 1,
                DataValue::Null => {}
            }
        }
        match (numbers, texts) {
            (n, 0) if n > 0 => ColumnKind::Quantitative,
            (0, t) if t > 0 => ColumnKind::Categorical,
            _ => ColumnKind::Unknown,
        }
    }

    fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}
